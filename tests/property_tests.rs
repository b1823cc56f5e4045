/// Property-based tests using proptest
/// Tests invariants that should hold for all lead inputs
use leads_api::core::models::CreateLeadRequest;
use leads_api::core::validation::{is_valid_email, validate_lead, NAME_MAX_LEN, PHONE_MAX_LEN};
use proptest::prelude::*;

// Property: validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn lead_validation_never_panics(name in "\\PC*", email in "\\PC*", phone in "\\PC*") {
        let _ = validate_lead(&CreateLeadRequest { name, email, phone });
    }
}

// Property: well-formed inputs are always accepted, and unchanged after trimming
proptest! {
    #[test]
    fn simple_emails_are_valid(
        local in "[a-z][a-z0-9._+-]{0,20}",
        domain in "[a-z][a-z0-9]{0,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn well_formed_leads_pass_validation(
        name in "[A-Za-zÀ-ú][A-Za-zÀ-ú ]{0,50}[A-Za-zÀ-ú]",
        local in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
        phone in "\\+[0-9]{8,15}"
    ) {
        let email = format!("{}@{}.com", local, domain);
        let lead = validate_lead(&CreateLeadRequest {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
        });

        prop_assert!(lead.is_ok());
        let lead = lead.unwrap();
        prop_assert_eq!(lead.name, name);
        prop_assert_eq!(lead.email, email);
        prop_assert_eq!(lead.phone, phone);
    }

    #[test]
    fn emails_without_at_are_rejected(email in "[a-z0-9.]{1,30}") {
        prop_assert!(!is_valid_email(&email));
    }
}

// Property: length limits are enforced per field
proptest! {
    #[test]
    fn overlong_fields_are_reported(extra_name in 1usize..50, extra_phone in 1usize..50) {
        let violations = validate_lead(&CreateLeadRequest {
            name: "a".repeat(NAME_MAX_LEN + extra_name),
            email: "ana@example.com".to_string(),
            phone: "1".repeat(PHONE_MAX_LEN + extra_phone),
        })
        .unwrap_err();

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        prop_assert_eq!(fields, vec!["name", "phone"]);
    }
}
