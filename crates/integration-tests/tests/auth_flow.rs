//! Authentication flows across service instances.

use std::io::Write as _;

use ferreteria_core::Role;
use ferreteria_integration_tests::{register, registration};
use ferreteria_storefront::Store;
use ferreteria_storefront::models::{StoredCredential, User};
use ferreteria_storefront::services::AuthService;
use ferreteria_storefront::services::auth::AdminManifest;
use ferreteria_storefront::storage::keys;

#[test]
fn bootstrap_admin_survives_service_reconstruction() {
    let store = Store::in_memory();
    register(&store, "Ana", "ana@ferreteria.com");
    register(&store, "Beto", "beto@example.com");

    // A brand-new service over the same store sees the same users.
    let auth = AuthService::new(&store);
    let session = auth
        .login("ana@ferreteria.com", "clave-segura")
        .expect("login");
    assert!(session.is_admin());

    let session = auth
        .login("beto@example.com", "clave-segura")
        .expect("login");
    assert_eq!(session.role, Role::Usuario);
}

#[test]
fn manifest_admins_appear_on_first_login_attempt() {
    let store = Store::in_memory();
    register(&store, "Ana", "ana@ferreteria.com");

    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"[{{"email": "gerente@ferreteria.com", "password": "llave-maestra"}}]"#
    )
    .expect("write manifest");

    let auth = AuthService::with_manifest(&store, AdminManifest::new(file.path()));
    let session = auth
        .login("gerente@ferreteria.com", "llave-maestra")
        .expect("manifest login");
    assert!(session.is_admin());
    assert_eq!(session.display_name, "Gerente");

    // The created account is a durable user, not a session artifact.
    let users: Vec<User> = store.get(keys::USERS);
    let manifest_admin = users
        .iter()
        .find(|u| u.email.as_str() == "gerente@ferreteria.com")
        .expect("persisted");
    assert_eq!(manifest_admin.role, Role::Admin);
    assert!(matches!(manifest_admin.password, StoredCredential::Argon2(_)));
}

#[test]
fn registration_then_login_with_wrong_case_email_works() {
    let store = Store::in_memory();
    let auth = AuthService::new(&store);
    auth.register(&registration("Ana", "Ana@Ferreteria.com"))
        .expect("register");

    // Emails normalize to lowercase on both sides.
    auth.login("ana@ferreteria.com", "clave-segura")
        .expect("login lowercased");
}

#[test]
fn plaintext_user_record_upgrades_once() {
    let store = Store::in_memory();
    // Simulate a record written by the pre-hashing format.
    let raw = r#"[{
        "nombres": "Vieja",
        "apellidos": "Cuenta",
        "email": "vieja@example.com",
        "password": "clave123",
        "rol": "usuario",
        "fechaRegistro": "2023-06-01T10:00:00Z"
    }]"#;
    let users: Vec<User> = serde_json::from_str(raw).expect("legacy parse");
    store.put(keys::USERS, &users).expect("seed");

    let auth = AuthService::new(&store);
    auth.login("vieja@example.com", "clave123").expect("login");

    let upgraded: Vec<User> = store.get(keys::USERS);
    let stored = &upgraded.first().expect("user").password;
    assert!(matches!(stored, StoredCredential::Argon2(_)));

    // Second login verifies against the hash and leaves it untouched.
    auth.login("vieja@example.com", "clave123").expect("login again");
    let after: Vec<User> = store.get(keys::USERS);
    assert_eq!(&after.first().expect("user").password, stored);
}
