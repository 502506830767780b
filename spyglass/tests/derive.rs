//! Integration tests for the Inspect derive macro.

use std::sync::{Arc, Weak};

use spyglass::{Context, Filter, Inspect, Introspector, Tag, Value};

#[derive(Inspect)]
#[inspect(label = "Pump")]
struct PumpState {
    flow_rate: f64,
    #[inspect(rename = "RPM")]
    rpm: u32,
    #[inspect(tags("advanced"))]
    seal_wear: u8,
    #[inspect(tags("advanced", "browsable"))]
    serial: &'static str,
    #[inspect(skip)]
    #[allow(dead_code)]
    scratch: Vec<u8>,
    owner: Option<String>,
}

fn pump() -> PumpState {
    PumpState {
        flow_rate: 12.5,
        rpm: 900,
        seal_wear: 3,
        serial: "P-77",
        scratch: vec![1, 2, 3],
        owner: None,
    }
}

#[test]
fn test_derived_names_are_pascal_case() {
    let props = Introspector::native_only()
        .introspect(&pump(), &Context::root(), &Filter::any())
        .unwrap();
    let names: Vec<_> = props.names().collect();
    assert_eq!(names, ["FlowRate", "Owner", "RPM", "SealWear", "Serial"]);
}

#[test]
fn test_derived_values() {
    let pump = pump();
    let ctx = Context::root();
    assert_eq!(pump.read("FlowRate", &ctx).unwrap(), Value::Float(12.5));
    assert_eq!(pump.read("RPM", &ctx).unwrap(), Value::UInt(900));
    assert_eq!(pump.read("Serial", &ctx).unwrap().as_str(), Some("P-77"));
    assert!(pump.read("Owner", &ctx).unwrap().is_null());
    assert!(pump.read("Scratch", &ctx).is_err());
}

#[test]
fn test_derived_label() {
    assert_eq!(pump().type_label(), "Pump");
}

#[test]
fn test_derived_tags() {
    let pump = pump();
    let descriptors = pump.describe(&Context::root()).unwrap();
    let wear = descriptors.iter().find(|d| d.name == "SealWear").unwrap();
    assert_eq!(wear.tags, [Tag::ADVANCED]);
    let flow = descriptors.iter().find(|d| d.name == "FlowRate").unwrap();
    assert_eq!(flow.tags, [Tag::BROWSABLE]);

    let browsable = Introspector::native_only()
        .introspect(&pump, &Context::root(), &Filter::browsable())
        .unwrap();
    let names: Vec<_> = browsable.names().collect();
    assert_eq!(names, ["FlowRate", "Owner", "RPM", "Serial"]);
}

#[derive(Inspect)]
struct Crew {
    lead: Arc<Member>,
    backup: Weak<Member>,
}

#[derive(Inspect)]
struct Member {
    name: String,
}

#[test]
fn test_derived_object_fields() {
    let lead = Arc::new(Member {
        name: "Ada".into(),
    });
    let gone = Arc::new(Member {
        name: "Bob".into(),
    });
    let crew = Crew {
        lead: lead.clone(),
        backup: Arc::downgrade(&gone),
    };
    drop(gone);

    let ctx = Context::root();
    let value = crew.read("Lead", &ctx).unwrap();
    assert_eq!(value.to_string(), "Member");
    assert_eq!(value, Value::Object(lead));
    assert!(crew.read("Backup", &ctx).unwrap().is_null());
}
