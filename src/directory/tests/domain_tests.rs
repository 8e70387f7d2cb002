//! Unit tests for user directory domain validation.

use crate::directory::domain::{DirectoryDomainError, NewUser, User};
use rstest::rstest;

fn valid_input() -> NewUser {
    NewUser {
        first_name: "Asha".to_owned(),
        middle_name: None,
        last_name: "Iyer".to_owned(),
        email: "asha.iyer@example.com".to_owned(),
        time_zone: "Asia/Kolkata".to_owned(),
    }
}

#[rstest]
fn new_user_trims_and_stores_profile_fields() {
    let mut input = valid_input();
    input.first_name = "  Asha ".to_owned();
    input.middle_name = Some(" K ".to_owned());

    let user = User::new(input).expect("valid user input");

    assert_eq!(user.first_name(), "Asha");
    assert_eq!(user.middle_name(), Some("K"));
    assert_eq!(user.last_name(), "Iyer");
    assert_eq!(user.email(), "asha.iyer@example.com");
    assert_eq!(user.time_zone(), chrono_tz::Asia::Kolkata);
    assert!(!user.is_deleted());
}

#[rstest]
fn blank_middle_name_is_dropped() {
    let mut input = valid_input();
    input.middle_name = Some("   ".to_owned());

    let user = User::new(input).expect("valid user input");

    assert_eq!(user.middle_name(), None);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_first_name_is_rejected(#[case] first_name: &str) {
    let mut input = valid_input();
    input.first_name = first_name.to_owned();

    assert_eq!(
        User::new(input),
        Err(DirectoryDomainError::EmptyFirstName)
    );
}

#[rstest]
fn empty_last_name_is_rejected() {
    let mut input = valid_input();
    input.last_name = String::new();

    assert_eq!(User::new(input), Err(DirectoryDomainError::EmptyLastName));
}

#[rstest]
#[case("not-an-address")]
#[case("@example.com")]
#[case("asha@")]
#[case("asha iyer@example.com")]
fn unaddressable_email_is_rejected(#[case] email: &str) {
    let mut input = valid_input();
    input.email = email.to_owned();

    assert!(matches!(
        User::new(input),
        Err(DirectoryDomainError::InvalidEmail(_))
    ));
}

#[rstest]
fn unknown_time_zone_is_rejected() {
    let mut input = valid_input();
    input.time_zone = "Mars/Olympus_Mons".to_owned();

    assert_eq!(
        User::new(input),
        Err(DirectoryDomainError::UnknownTimeZone(
            "Mars/Olympus_Mons".to_owned()
        ))
    );
}

#[rstest]
fn mark_deleted_is_idempotent() {
    let mut user = User::new(valid_input()).expect("valid user input");

    user.mark_deleted();
    user.mark_deleted();

    assert!(user.is_deleted());
}
