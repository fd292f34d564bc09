use super::*;

fn signed_in(role: &str) -> Credentials {
    Credentials {
        token: Some("tok".to_owned()),
        username: Some("user".to_owned()),
        role: Some(role.to_owned()),
    }
}

fn redirect(path: &str) -> Decision {
    Decision::Redirect(path.to_owned())
}

// =============================================================
// Guest-only pages
// =============================================================

#[test]
fn signed_in_user_is_bounced_from_login_to_role_home() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/login", &signed_in("admin")), redirect("/analytics"));
    assert_eq!(table.check("/login", &signed_in("trainer")), redirect("/trainer-classes"));
    assert_eq!(table.check("/register/", &signed_in("member")), redirect("/my-classes"));
}

#[test]
fn signed_in_unknown_role_is_bounced_from_login_to_root() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/login", &signed_in("janitor")), redirect("/"));
}

#[test]
fn guest_may_open_login_and_register() {
    let table = RouteTable::standard();
    let guest = Credentials::default();
    assert_eq!(table.check("/login", &guest), Decision::Allow);
    assert_eq!(table.check("/register", &guest), Decision::Allow);
    assert_eq!(table.check("/", &guest), Decision::Allow);
}

// =============================================================
// Authentication
// =============================================================

#[test]
fn guest_is_sent_to_login_for_protected_pages() {
    let table = RouteTable::standard();
    let guest = Credentials::default();
    for target in ["/classes", "/classes/", "/payments", "/my-classes?x=1"] {
        assert_eq!(table.check(target, &guest), redirect("/login"), "target {target}");
    }
}

#[test]
fn empty_token_counts_as_signed_out() {
    let table = RouteTable::standard();
    let creds = Credentials { token: Some(String::new()), username: None, role: Some("admin".to_owned()) };
    assert_eq!(table.check("/analytics", &creds), redirect("/login"));
}

#[test]
fn any_role_may_open_classes() {
    let table = RouteTable::standard();
    for role in ["admin", "trainer", "member", "janitor"] {
        assert_eq!(table.check("/classes", &signed_in(role)), Decision::Allow, "role {role}");
    }
}

// =============================================================
// Roles
// =============================================================

#[test]
fn trainer_is_sent_home_from_admin_pages() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/payments", &signed_in("trainer")), redirect("/trainer-classes"));
    assert_eq!(table.check("/rooms/", &signed_in("trainer")), redirect("/trainer-classes"));
}

#[test]
fn member_is_sent_home_from_trainer_pages() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/trainer-classes", &signed_in("member")), redirect("/my-classes"));
    assert_eq!(table.check("/attendances", &signed_in("member")), redirect("/my-classes"));
}

#[test]
fn unknown_role_is_sent_to_login_from_role_gated_pages() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/payments", &signed_in("janitor")), redirect("/login"));
}

#[test]
fn allowed_roles_pass() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/payments", &signed_in("admin")), Decision::Allow);
    assert_eq!(table.check("/attendances", &signed_in("trainer")), Decision::Allow);
    assert_eq!(table.check("/my-classes/", &signed_in("member")), Decision::Allow);
}

#[test]
fn every_role_home_admits_its_role() {
    let table = RouteTable::standard();
    for role in ["admin", "trainer", "member"] {
        let creds = signed_in(role);
        let home = creds.known_role().unwrap().home();
        assert_eq!(table.check(home, &creds), Decision::Allow, "home for {role}");
    }
}

#[test]
fn unknown_targets_are_allowed() {
    let table = RouteTable::standard();
    assert_eq!(table.check("/nowhere", &Credentials::default()), Decision::Allow);
}

#[test]
fn relative_target_is_guarded_like_absolute() {
    let table = RouteTable::standard();
    assert_eq!(table.check("payments", &Credentials::default()), redirect("/login"));
    assert_eq!(table.check("payments", &signed_in("trainer")), redirect("/trainer-classes"));
    assert_eq!(table.check("payments", &signed_in("admin")), Decision::Allow);
}
