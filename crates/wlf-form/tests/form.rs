//! Behaviour of a form driven through field handles.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};
use wlf_form::{FieldConfig, FormController, FormError, ValidateOptions};
use wlf_model::{FieldPath, FormOptions, ValidationMode};
use wlf_store::SetOptions;
use wlf_validate::Pattern;

fn signup_form() -> FormController {
    FormController::new(
        json!({ "profile": { "name": "x", "email": "" }, "age": 0 }),
        FormOptions::default(),
    )
}

#[test]
fn test_on_blur_field_validates_only_after_blur() {
    let form = signup_form();
    let email = form
        .register_field(
            FieldConfig::new(|s| s.key("profile").key("email"))
                .required()
                .pattern(Pattern::email()),
        )
        .unwrap();

    email.on_change_value("not-an-email");
    assert!(email.errors().is_empty());
    assert!(email.record().is_dirty);

    email.on_blur();
    assert_eq!(email.errors(), vec!["Must be email"]);
    assert!(email.record().has_validated);
}

#[test]
fn test_revalidate_mode_takes_over_after_first_validation() {
    let form = FormController::new(
        json!({ "code": "" }),
        FormOptions::default()
            .with_mode(ValidationMode::OnBlur)
            .with_revalidate_mode(ValidationMode::OnChange),
    );
    let code = form
        .register_field(FieldConfig::at_path(["code"]).min_length(3))
        .unwrap();

    code.on_change_value("a");
    assert!(code.errors().is_empty());
    code.on_blur();
    assert_eq!(code.errors(), vec!["Must have at least 3 characters"]);

    // onChange now governs; is_dirty is already set so every event runs.
    code.on_change_value("abc");
    assert!(code.errors().is_empty());
}

#[test]
fn test_field_mode_overrides_form_mode() {
    let form = FormController::new(
        json!({ "a": "" }),
        FormOptions::default().with_mode(ValidationMode::OnValidate),
    );
    let field = form
        .register_field(FieldConfig::at_path(["a"]).required().mode(ValidationMode::OnTouched))
        .unwrap();
    field.on_focus();
    assert_eq!(field.errors(), vec!["Required"]);
}

#[test]
fn test_on_validate_mode_only_runs_when_forced() {
    let form = FormController::new(
        json!({ "a": "" }),
        FormOptions::default()
            .with_mode(ValidationMode::OnValidate)
            .with_revalidate_mode(ValidationMode::OnValidate),
    );
    let field = form.register_field(FieldConfig::at_path(["a"]).required()).unwrap();
    field.on_focus();
    field.on_change_value("");
    field.on_blur();
    assert!(field.errors().is_empty());
    assert!(!form.validate());
    assert_eq!(field.errors(), vec!["Required"]);
}

#[test]
fn test_silent_validation_never_writes_errors() {
    let form = signup_form();
    let name = form
        .register_field(FieldConfig::at_path(["profile", "name"]).min_length(2))
        .unwrap();
    let age = form
        .register_field(FieldConfig::at_path(["age"]).required())
        .unwrap();

    let before = form.ui().get();
    assert!(!form.silently_validate());
    assert_eq!(form.ui().get(), before);
    assert!(name.errors().is_empty());
    assert!(!age.record().has_validated);

    form.set_path(&FieldPath::from(["profile", "name"]), json!("xy"), SetOptions::default());
    form.set_path(&FieldPath::from(["age"]), json!(30), SetOptions::default());
    assert!(form.silently_validate());
}

#[test]
fn test_required_falsy_values_through_form() {
    let form = FormController::new(json!({}), FormOptions::default());
    let field = form
        .register_field(FieldConfig::at_path(["v"]).required())
        .unwrap();
    for (value, expected) in [
        (json!(""), false),
        (json!(0), false),
        (json!(false), false),
        (json!("0"), true),
    ] {
        field.on_change_value(value.clone());
        assert_eq!(field.validate(ValidateOptions::forced()).unwrap(), expected, "{value}");
    }
}

#[test]
fn test_accessor_path_and_lookup() {
    let form = signup_form();
    let name = form
        .register_field(FieldConfig::new(|s| s.key("profile").key("name")))
        .unwrap();
    assert_eq!(name.path(), &FieldPath::from(["profile", "name"]));
    assert_eq!(name.value(), Some(json!("x")));
}

#[test]
fn test_email_message_override() {
    let form = FormController::new(json!({ "email": "not-an-email" }), FormOptions::default());
    let plain = form
        .register_field(FieldConfig::at_path(["email"]).pattern(Pattern::email()))
        .unwrap();
    let custom = form
        .register_field(
            FieldConfig::at_path(["email"]).pattern((Pattern::email(), "Please enter an email")),
        )
        .unwrap();

    assert!(!form.validate());
    assert_eq!(plain.errors(), vec!["Must be email"]);
    assert_eq!(custom.errors(), vec!["Please enter an email"]);

    plain.on_change_value("someone@example.com");
    assert!(form.validate());
}

#[test]
fn test_reset_restores_initial_state() {
    let form = signup_form();
    let initial = form.get();
    let name = form
        .register_field(FieldConfig::at_path(["profile", "name"]))
        .unwrap();
    name.on_change_value("changed");
    form.mutate(|state| state["extra"] = json!(true));
    assert_ne!(form.get(), initial);

    form.reset(None);
    assert_eq!(form.get(), initial);
    // Interaction state survives a reset.
    assert!(name.record().is_dirty);

    form.reset(Some(json!({ "profile": { "name": "other" } })));
    assert_eq!(name.value(), Some(json!("other")));
}

#[test]
fn test_default_applied_silently() {
    let form = FormController::new(json!({}), FormOptions::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    form.values().subscribe(|state: &Value| state.clone(), move |state| {
        sink.borrow_mut().push(state.clone());
    });

    let count = form
        .register_field(FieldConfig::new(|s| s.key("settings").key("count")).default_value(5))
        .unwrap();
    assert_eq!(form.get_path(&FieldPath::from(["settings", "count"])), Some(json!(5)));
    assert_eq!(count.value(), Some(json!(5)));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_default_does_not_overwrite_present_value() {
    let form = FormController::new(json!({ "n": null }), FormOptions::default());
    let n = form
        .register_field(FieldConfig::at_path(["n"]).default_value(5))
        .unwrap();
    assert_eq!(n.value(), Some(Value::Null));
}

#[test]
fn test_handle_subscriptions() {
    let form = signup_form();
    let email = form
        .register_field(FieldConfig::at_path(["profile", "email"]).required())
        .unwrap();

    let values = Rc::new(RefCell::new(Vec::new()));
    let errors = Rc::new(RefCell::new(Vec::new()));
    let value_sink = Rc::clone(&values);
    let error_sink = Rc::clone(&errors);
    email.subscribe_value(move |value| value_sink.borrow_mut().push(value.cloned()));
    let errors_sub = email.subscribe_errors(move |list| error_sink.borrow_mut().push(list.to_vec()));

    // Unrelated writes do not reach the value listener.
    form.set_path(&FieldPath::from(["age"]), json!(1), SetOptions::default());
    email.on_blur();
    email.on_change_value("a@b.co");

    assert_eq!(*values.borrow(), vec![Some(json!("a@b.co"))]);
    assert_eq!(
        *errors.borrow(),
        vec![vec!["Required".to_string()], Vec::<String>::new()]
    );

    assert!(email.unsubscribe_errors(errors_sub));
    email.on_change_value("");
    assert_eq!(errors.borrow().len(), 2);
}

#[test]
fn test_custom_props_and_reserved_keys() {
    let form = signup_form();
    let name = form
        .register_field(FieldConfig::at_path(["profile", "name"]).prop("label", "Name"))
        .unwrap();
    assert_eq!(name.custom_props().get("label"), Some(&json!("Name")));

    for key in ["value", "errors", "onChangeValue", "onFocus", "onBlur"] {
        let err = form
            .register_field(FieldConfig::at_path(["profile", "name"]).prop(key, 1))
            .unwrap_err();
        assert!(matches!(err, FormError::ReservedProp { key: ref found } if found == key));
    }
}

#[test]
fn test_invalid_regex_pattern() {
    let err = FieldConfig::at_path(["a"]).pattern_regex("(", None).unwrap_err();
    assert!(matches!(err, FormError::InvalidPattern { .. }));

    let form = FormController::new(json!({ "zip": "12a" }), FormOptions::default());
    let zip = form
        .register_field(
            FieldConfig::parse_path("zip")
                .unwrap()
                .pattern_regex(r"^\d{5}$", Some("Five digits"))
                .unwrap(),
        )
        .unwrap();
    assert!(!form.validate());
    assert_eq!(zip.errors(), vec!["Five digits"]);
}

#[test]
fn test_interaction_record_after_focus_and_blur() {
    let form = signup_form();
    let email = form
        .register_field(FieldConfig::at_path(["profile", "email"]).required())
        .unwrap();
    email.on_focus();
    email.on_blur();
    insta::assert_json_snapshot!(email.record(), @r#"
    {
      "errors": [
        "Required"
      ],
      "isDirty": false,
      "hasFocused": true,
      "hasBlurred": true,
      "hasValidated": true
    }
    "#);
}
