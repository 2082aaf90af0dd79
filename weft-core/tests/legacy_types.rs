use weft_core::{Checker, DeclModel, ViolationKind};
use weft_decl::{span, AccessChain, Declaration, Ident, Qualifiers, Spanned, TypeId};

fn ident(name: &str) -> Ident {
    Spanned::new(span(0, name.len()), name.to_string())
}

const MEMBERS: [&str; 3] = ["lock", "unlock", "push"];

fn populate(model: &mut DeclModel, ty: TypeId) {
    for name in MEMBERS {
        model
            .add_member(ty, Declaration::method(ident(name), Qualifiers::NONE, None))
            .unwrap();
    }
    model.finalize_type(ty).unwrap();
}

#[test]
fn every_member_of_a_legacy_type_is_reachable_from_a_shared_root() {
    let mut model = DeclModel::new();
    let old = model.add_legacy_type("OldQueue");
    populate(&mut model, old);

    let checker = Checker::new(&model);
    let shared_q = Declaration::variable(ident("q"), Qualifiers::SHARED, Some(old));
    for name in MEMBERS {
        checker
            .check(&AccessChain::rooted(shared_q.clone()).call(ident(name)))
            .unwrap_or_else(|v| panic!("legacy member {name} should be reachable: {}", v.message()));
    }
}

#[test]
fn the_same_members_without_legacy_are_all_rejected_from_a_shared_root() {
    let mut model = DeclModel::new();
    let new = model.add_type("NewQueue");
    populate(&mut model, new);

    let checker = Checker::new(&model);
    let shared_q = Declaration::variable(ident("q"), Qualifiers::SHARED, Some(new));
    for name in MEMBERS {
        let err = checker
            .check(&AccessChain::rooted(shared_q.clone()).call(ident(name)))
            .expect_err("unqualified member must be rejected from a shared root");
        assert_eq!(err.kind, ViolationKind::InaccessibleInSharedContext);
        assert_eq!(err.step, 1);
    }
}

#[test]
fn legacy_entry_does_not_escape_sharedness_for_what_lies_beyond() {
    // A legacy wrapper holding a plain annotated type: stepping through
    // the wrapper from a shared root keeps the context shared, so the
    // inner plain member is still off limits.
    let mut model = DeclModel::new();
    let inner = model.add_type("Inner");
    model
        .add_member(
            inner,
            Declaration::field(ident("data"), Qualifiers::NONE, None),
        )
        .unwrap();
    model.finalize_type(inner).unwrap();

    let wrapper = model.add_legacy_type("OldWrapper");
    model
        .add_member(
            wrapper,
            Declaration::field(ident("inner_"), Qualifiers::NONE, Some(inner)),
        )
        .unwrap();
    model.finalize_type(wrapper).unwrap();

    let checker = Checker::new(&model);
    let shared_w = Declaration::variable(ident("w"), Qualifiers::SHARED, Some(wrapper));
    let err = checker
        .check(
            &AccessChain::rooted(shared_w)
                .read(ident("inner_"))
                .read(ident("data")),
        )
        .expect_err("sharedness must persist through the legacy entry point");
    assert_eq!(err.kind, ViolationKind::InaccessibleInSharedContext);
    assert_eq!(err.step, 2);
    assert_eq!(err.member, "data");
}

#[test]
fn legacy_type_from_a_non_shared_root_behaves_like_plain_code() {
    let mut model = DeclModel::new();
    let old = model.add_legacy_type("OldQueue");
    populate(&mut model, old);

    let checker = Checker::new(&model);
    let plain_q = Declaration::variable(ident("q"), Qualifiers::NONE, Some(old));
    for name in MEMBERS {
        checker
            .check(&AccessChain::rooted(plain_q.clone()).call(ident(name)))
            .expect("non-shared access to a legacy type is unrestricted");
    }
}
