use proptest::prelude::*;
use tempfile::tempdir;
use wax_project::{validate, AnchorStatus, InitOptions, Initializer, ProjectAnchor};

fn options() -> impl Strategy<Value = InitOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(as_library, production)| InitOptions {
        as_library,
        production,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn new_projects_start_valid_and_ignored(
        name in "[A-Za-z0-9][A-Za-z0-9_-]{0,24}",
        authors in proptest::collection::vec("[A-Za-z][A-Za-z .'-]{0,16}", 0..4),
        options in options(),
    ) {
        let dir = tempdir().unwrap();
        Initializer::new(dir.path(), "alice")
            .initialize(&name, &authors, options)
            .unwrap();

        prop_assert_eq!(
            validate(dir.path().join(&name)).unwrap(),
            AnchorStatus::Valid { ignored: true }
        );
    }

    #[test]
    fn anchors_survive_render_and_parse(
        name in "[A-Za-z0-9 _.:#'\"-]{1,20}",
        user in "[a-z_][a-z0-9_-]{0,15}",
        author in "[A-Za-z][A-Za-z ]{0,15}",
    ) {
        let anchor = ProjectAnchor::new(name, &user, &author);
        let parsed = ProjectAnchor::parse(&anchor.render().unwrap()).unwrap();
        prop_assert_eq!(parsed, anchor);
    }
}
