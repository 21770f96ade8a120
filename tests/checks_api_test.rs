//! Integration tests for running the built-in checks through the public API.

use healthcheck::check::{
    Check, CheckContext, CheckId, CheckRegistry, CheckRunner, Outcome, Selection, Severity,
};
use healthcheck::report::Report;
use healthcheck::runtime::{Runtime, ServerFamily, Snapshot, SnapshotRuntime};
use healthcheck::{HealthCheckError, Result};

const APACHE_HOST: &str = r#"
php_version: "5.2.6"
server: apache
settings:
  safe_mode: "1"
  memory_limit: 16M
  max_execution_time: 30
  upload_max_filesize: 2M
  post_max_size: 8M
  default_charset: "UTF-8"
locked: [memory_limit]
functions: [iconv, apache_get_modules]
modules: [mod_rewrite, mod_security]
unicode_regex: false
libxml_version: "2.7.3"
ignore_user_abort: false
"#;

fn apache_host() -> SnapshotRuntime {
    SnapshotRuntime::new(Snapshot::parse(APACHE_HOST, "apache-host").unwrap())
}

fn run(runtime: &mut SnapshotRuntime, server: ServerFamily) -> Report {
    let registry = CheckRegistry::with_builtins().unwrap();
    CheckRunner::new(&registry, CheckContext::new(server)).run(runtime)
}

fn outcomes_for(report: &Report, id: &str) -> Vec<Outcome> {
    report
        .outcomes()
        .filter(|o| o.check_id == CheckId::new(id))
        .cloned()
        .collect()
}

#[test]
fn running_twice_is_idempotent() {
    let mut runtime = apache_host();
    let before = runtime.snapshot().clone();

    let first = run(&mut runtime, ServerFamily::Apache);
    assert_eq!(runtime.snapshot(), &before);

    let second = run(&mut runtime, ServerFamily::Apache);
    assert_eq!(first, second);
    assert_eq!(runtime.snapshot(), &before);
}

#[test]
fn apache_checks_produce_nothing_off_apache() {
    let mut runtime = apache_host();
    let report = run(&mut runtime, ServerFamily::Other);

    for id in ["apache-functions", "mod-rewrite", "mod-security"] {
        assert!(outcomes_for(&report, id).is_empty(), "{} produced outcomes", id);
    }
}

#[test]
fn every_outcome_is_in_registration_order() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let order: Vec<CheckId> = registry.all().map(|c| c.id()).collect();

    let mut runtime = apache_host();
    let report = run(&mut runtime, ServerFamily::Apache);

    let positions: Vec<usize> = report
        .outcomes()
        .map(|o| order.iter().position(|id| id == &o.check_id).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn apache_host_findings() {
    let mut runtime = apache_host();
    let report = run(&mut runtime, ServerFamily::Apache);

    assert!(!outcomes_for(&report, "safe-mode")[0].passed);
    assert!(!outcomes_for(&report, "memory-limit")[0].passed);
    assert!(!outcomes_for(&report, "memory-limit-override")[0].passed);
    assert!(outcomes_for(&report, "max-execution-time")[0].passed);
    assert!(outcomes_for(&report, "mod-rewrite")[0].passed);

    let upload = outcomes_for(&report, "upload-size");
    assert_eq!(upload.len(), 2);
    assert!(!upload[0].passed);
    assert!(upload[1].passed);

    let multibyte: Vec<bool> = outcomes_for(&report, "multibyte-string")
        .iter()
        .map(|o| o.passed)
        .collect();
    assert_eq!(multibyte, vec![false, true, false]);

    let libxml = outcomes_for(&report, "libxml-xmlrpc");
    assert!(!libxml[0].passed);
    assert_eq!(libxml[0].severity, Severity::Error);

    let security = outcomes_for(&report, "mod-security");
    assert!(!security[0].passed);
    assert_eq!(security[0].severity, Severity::Informational);

    assert!(report.has_failures(Severity::Error));
}

#[test]
fn memory_limit_examples() {
    for (limit, passed) in [
        (Some("16M"), false),
        (Some("64M"), true),
        (Some(""), true),
        (None, true),
    ] {
        let mut snapshot = Snapshot::default();
        if let Some(limit) = limit {
            snapshot
                .settings
                .insert("memory_limit".into(), limit.into());
        }
        let report = run(&mut SnapshotRuntime::new(snapshot), ServerFamily::Other);
        let outcome = &outcomes_for(&report, "memory-limit")[0];
        assert_eq!(outcome.passed, passed, "memory_limit {:?}", limit);
        assert_eq!(outcome.severity, Severity::Recommendation);
    }
}

#[test]
fn default_charset_examples() {
    for (charset, passed) in [("UTF-8", true), ("UTF\u{2011}8\u{2020}", false)] {
        let mut snapshot = Snapshot::default();
        snapshot
            .settings
            .insert("default_charset".into(), charset.into());
        let report = run(&mut SnapshotRuntime::new(snapshot), ServerFamily::Other);
        let outcome = &outcomes_for(&report, "default-charset")[0];
        assert_eq!(outcome.passed, passed, "{}", charset);
        assert_eq!(outcome.severity, Severity::Error);
    }
}

#[test]
fn libxml_denylist_examples() {
    for (libxml, passed) in [("2.7.1", false), ("2.7.4", true)] {
        let mut snapshot = Snapshot::default();
        snapshot.php_version = "8.3.0".into();
        snapshot.libxml_version = Some(libxml.into());
        let report = run(&mut SnapshotRuntime::new(snapshot), ServerFamily::Other);
        assert_eq!(outcomes_for(&report, "libxml-xmlrpc")[0].passed, passed);
    }
}

/// A check whose probe always fails.
struct BrokenProbe;

impl Check for BrokenProbe {
    fn id(&self) -> CheckId {
        CheckId::new("broken-probe")
    }

    fn description(&self) -> &str {
        "Always fails to read the runtime"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        runtime.module_loaded("mod_rewrite")?;
        Ok(vec![])
    }
}

#[test]
fn probe_failures_become_error_outcomes() {
    let mut registry = CheckRegistry::with_builtins().unwrap();
    registry.register(Box::new(BrokenProbe)).unwrap();

    let mut runtime = SnapshotRuntime::new(Snapshot::default());
    let report = CheckRunner::new(&registry, CheckContext::default()).run(&mut runtime);

    let broken = outcomes_for(&report, "broken-probe");
    assert_eq!(broken.len(), 1);
    assert!(!broken[0].passed);
    assert_eq!(broken[0].severity, Severity::Error);
    assert!(broken[0].message.contains("broken-probe"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = CheckRegistry::with_builtins().unwrap();
    registry.register(Box::new(BrokenProbe)).unwrap();

    let err = registry.register(Box::new(BrokenProbe)).unwrap_err();
    assert!(matches!(err, HealthCheckError::DuplicateCheck { ref id } if id == "broken-probe"));
}

#[test]
fn selection_limits_the_run() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let selection = Selection::new(["memory-limit", "upload-size"], ["upload-size"]);
    selection.validate(&registry).unwrap();

    let mut runtime = SnapshotRuntime::new(Snapshot::default());
    let report = CheckRunner::new(&registry, CheckContext::default())
        .with_selection(selection)
        .run(&mut runtime);

    let ids: Vec<&str> = report.outcomes().map(|o| o.check_id.as_str()).collect();
    assert_eq!(ids, vec!["memory-limit"]);
}
