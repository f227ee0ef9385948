use shapeguard_core::{
    Category, ContractError, ContractKernel, FieldAccess, KernelConfig, KindDef, ObjectRef,
    SeedPolicy, ShapeDefinition, Value,
};

fn point_fields() -> ShapeDefinition {
    ShapeDefinition::new()
        .field("x", KindDef::number())
        .field("y", KindDef::number())
}

#[test]
fn point_scenario_enforces_fields_and_kinds() {
    let mut kernel = ContractKernel::default();
    let point = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");

    let mut p = point.construct();
    p.set("x", 5).expect("x = 5");

    let err = p.set("z", 1).expect_err("z is undeclared");
    assert!(matches!(
        err,
        ContractError::UnknownField {
            access: FieldAccess::Write,
            ..
        }
    ));

    let err = p.set("x", "a").expect_err("x must be a number");
    assert_eq!(
        err,
        ContractError::TypeMismatch {
            field: Some("x".to_string()),
            expected: KindDef::number(),
            actual: Category::String,
        }
    );
    assert_eq!(p.get("x").expect("x read"), Value::Number(5.0));
}

#[test]
fn undeclared_fields_fail_regardless_of_prior_writes() {
    let mut kernel = ContractKernel::default();
    let point = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");
    let mut p = point.construct();

    for _ in 0..3 {
        p.set("x", 1).expect("declared write");
        p.set("y", 2).expect("declared write");
        let err = p.get("z").expect_err("undeclared read");
        assert_eq!(
            err,
            ContractError::UnknownField {
                shape: "Point".to_string(),
                field: "z".to_string(),
                access: FieldAccess::Read,
            }
        );
        assert!(p.set("z", 3).is_err());
    }
    assert_eq!(p.keys(), vec!["x", "y"]);
}

#[test]
fn extension_matches_manual_union_with_derived_precedence() {
    let mut kernel = ContractKernel::default();
    kernel
        .define_interface(
            "Base",
            ShapeDefinition::new()
                .field("id", KindDef::number())
                .field("label", KindDef::string()),
            None,
        )
        .expect("define Base");
    let derived = kernel
        .define_interface(
            "Derived",
            ShapeDefinition::new()
                .field("id", KindDef::string())
                .field("active", KindDef::boolean()),
            Some("Base"),
        )
        .expect("define Derived");

    let manual = ShapeDefinition::new()
        .field("id", KindDef::string())
        .field("label", KindDef::string())
        .field("active", KindDef::boolean());
    assert_eq!(derived.definition(), &manual);

    let mut instance = derived.construct();
    instance.set("id", "abc").expect("derived kind wins");
    instance.set("label", "inherited").expect("base field kept");
    assert!(instance.set("id", 7).is_err());
}

#[test]
fn extension_of_unknown_base_fails_and_registers_nothing() {
    let mut kernel = ContractKernel::default();
    let err = kernel
        .define_interface("Point3", point_fields(), Some("Point"))
        .expect_err("missing base");

    assert_eq!(err, ContractError::UnknownShape("Point".to_string()));
    assert!(kernel.interface_names().is_empty());
}

#[test]
fn extension_does_not_follow_later_base_changes() {
    let mut kernel = ContractKernel::default();
    kernel
        .define_interface("Base", ShapeDefinition::new().field("a", KindDef::number()), None)
        .expect("define Base");
    let derived = kernel
        .define_interface("Derived", ShapeDefinition::new(), Some("Base"))
        .expect("define Derived");

    kernel
        .define_interface("Base", ShapeDefinition::new().field("b", KindDef::number()), None)
        .expect("redefine Base");

    assert!(derived.definition().declares("a"));
    assert!(!derived.definition().declares("b"));
}

#[test]
fn re_registration_replaces_silently_but_old_constructor_keeps_its_shape() {
    let mut kernel = ContractKernel::default();
    let old = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");
    let new = kernel
        .define_interface(
            "Point",
            ShapeDefinition::new().field("x", KindDef::string()),
            None,
        )
        .expect("redefine Point");

    let mut from_old = old.construct();
    from_old.set("x", 1).expect("old shape still takes numbers");
    from_old.set("y", 2).expect("old shape still has y");

    let mut from_new = new.construct();
    from_new.set("x", "one").expect("new shape takes strings");
    assert!(from_new.set("y", 2).is_err());

    let looked_up = kernel.interface("Point").expect("lookup");
    assert_eq!(looked_up.definition().kind_of("x"), Some(&KindDef::string()));
}

#[test]
fn validated_seed_must_fit_the_interface() {
    let mut kernel = ContractKernel::default();
    let point = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");

    let good = ObjectRef::from_entries([("x", Value::from(1)), ("y", Value::from(2))]);
    let p = point.construct_with(good).expect("valid seed");
    assert_eq!(p.get("y").expect("y read"), Value::Number(2.0));

    let bad = ObjectRef::from_entries([("x", Value::from("1"))]);
    let err = point.construct_with(bad).expect_err("bad seed kind");
    assert!(matches!(err, ContractError::TypeMismatch { .. }));
}

#[test]
fn validated_instance_ignores_later_seed_writes() {
    let mut kernel = ContractKernel::default();
    let point = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");

    let seed = ObjectRef::from_entries([("x", Value::from(1))]);
    let p = point.construct_with(seed.clone()).expect("valid seed");
    seed.insert("z", Value::from("bad"));
    seed.insert("x", Value::from("bad"));

    assert_eq!(p.keys(), vec!["x"]);
    assert_eq!(p.get("x").expect("x read"), Value::Number(1.0));
}

#[test]
fn trusted_seed_keeps_host_behaviour() {
    let mut kernel = ContractKernel::new(KernelConfig::default().with_seed_policy(SeedPolicy::Trust));
    let point = kernel
        .define_interface("Point", point_fields(), None)
        .expect("define Point");

    let seed = ObjectRef::from_entries([("x", Value::from("1")), ("z", Value::from(true))]);
    let mut p = point.construct_with(seed).expect("seed accepted unchecked");

    assert_eq!(p.get("x").expect("x read"), Value::from("1"));
    assert!(p.get("z").is_err(), "undeclared seed keys stay unreadable");
    assert!(p.set("x", "2").is_err(), "later writes are still checked");
}

#[test]
fn object_fields_reject_null() {
    let mut kernel = ContractKernel::default();
    let holder = kernel
        .define_interface(
            "Holder",
            ShapeDefinition::new().field("inner", KindDef::object()),
            None,
        )
        .expect("define Holder");

    let mut h = holder.construct();
    let err = h.set("inner", Value::Null).expect_err("null is not an object");
    assert_eq!(
        err,
        ContractError::TypeMismatch {
            field: Some("inner".to_string()),
            expected: KindDef::object(),
            actual: Category::Object,
        }
    );
    h.set("inner", ObjectRef::new()).expect("record is an object");
    assert_eq!(h.to_json(), serde_json::json!({ "inner": {} }));
}
