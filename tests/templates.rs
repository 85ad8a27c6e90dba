// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging through named templates from the process-wide table.

use stacklog::global_templates::set_global_templates;
use stacklog::{Aggregator, Error, Template, TemplateSet};
use std::sync::Once;

static INSTALL: Once = Once::new();

const FORMULAS: &str = r#"[{"name": "testExample", "stack": "${name}.formulas.${formulaName}"}]"#;
const SESSIONS: &str = r#"[{"name": "login", "stack": "session.${user}.login"}]"#;

fn install_templates() {
    INSTALL.call_once(|| {
        let mut templates = TemplateSet::from_json(FORMULAS).unwrap();
        templates.extend_from_json(SESSIONS).unwrap();
        set_global_templates(templates).unwrap();
    });
}

#[test]
fn log_through_templates() {
    install_templates();
    let mut log = Aggregator::new();

    let sum = Template::named("testExample")
        .unwrap()
        .with("name", "waabox")
        .with("formulaName", "sum");
    log.log_template(&sum, "10").unwrap();

    let pow = Template::named("testExample")
        .unwrap()
        .with("name", "waabox_2")
        .with("formulaName", "pow");
    log.log_template(&pow, "20").unwrap();

    let root = log.generate().unwrap();
    let waabox_sum = &root.children()[0].children()[0].children()[0].children()[0];
    assert_eq!(waabox_sum.value(), Some("10"));
    let waabox_2_pow = &root.children()[1].children()[0].children()[0].children()[0];
    assert_eq!(waabox_2_pow.value(), Some("20"));
}

#[test]
fn template_placeholders_resolved_by_globals() {
    install_templates();
    let mut log = Aggregator::new();
    log.register_global("name", "waabox");

    let sum = Template::named("testExample")
        .unwrap()
        .with("name", "${name}")
        .with("formulaName", "sum");
    log.log_template(&sum, "10").unwrap();

    let pow = Template::named("testExample")
        .unwrap()
        .with("name", "${name}")
        .with("formulaName", "pow");
    log.log_template(&pow, "20").unwrap();

    let root = log.generate().unwrap();
    assert_eq!(root.children().len(), 1);
    let formulas = &root.children()[0].children()[0];
    assert_eq!(formulas.stack(), ".waabox.formulas");
    assert_eq!(formulas.children()[0].children()[0].value(), Some("10"));
    assert_eq!(formulas.children()[1].children()[0].value(), Some("20"));
}

#[test]
fn templates_from_several_documents() {
    install_templates();
    let login = Template::named("login").unwrap().with("user", "waabox");
    assert_eq!(login.stack(), "session.waabox.login");
}

#[test]
fn named_copies_are_independent() {
    install_templates();
    let filled = Template::named("testExample").unwrap().with("name", "x");
    assert_eq!(filled.stack(), "x.formulas.${formulaName}");
    assert_eq!(
        Template::named("testExample").unwrap().stack(),
        "${name}.formulas.${formulaName}"
    );
}

#[test]
fn unknown_template_propagates() {
    install_templates();
    match Template::named("missing") {
        Err(Error::TemplateNotFound(name)) => assert_eq!(name, "missing"),
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
}
