//! Message and constructor coverage for the port error enums.

use super::*;
use rstest::rstest;

#[rstest]
#[case(KeyValueStoreError::not_found("users/ada").to_string(), "no value stored under key users/ada")]
#[case(
    CredentialRepositoryError::not_found("ada").to_string(),
    "no credential for ada"
)]
#[case(
    MealRepositoryError::not_found().to_string(),
    "meal collection has not been initialised"
)]
#[case(
    MealRepositoryError::storage("disk full").to_string(),
    "meal store failure: disk full"
)]
#[case(
    PasswordHasherError::hash("bad digest").to_string(),
    "password hashing failed: bad digest"
)]
#[case(TokenCodecError::invalid("bad signature").to_string(), "invalid token: bad signature")]
fn port_errors_render_messages(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}

#[rstest]
fn storage_constructors_accept_owned_and_borrowed_strings() {
    let owned = KeyValueStoreError::storage(String::from("io"));
    let borrowed = KeyValueStoreError::storage("io");
    assert_eq!(owned, borrowed);
}
