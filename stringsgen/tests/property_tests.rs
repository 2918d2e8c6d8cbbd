use proptest::prelude::*;
use stringsgen::{
    BuildConfig, EnumBuilder, Entry, Indentation, PlaceholderType, parse_placeholders,
    placeholder::MAX_POSITION,
};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Za-z0-9]{0,12}").expect("valid key regex")
}

fn placeholder_strategy() -> impl Strategy<Value = PlaceholderType> {
    prop_oneof![
        Just(PlaceholderType::Object),
        Just(PlaceholderType::Int),
        Just(PlaceholderType::Float),
        Just(PlaceholderType::Char),
        Just(PlaceholderType::CString),
        Just(PlaceholderType::Unknown),
    ]
}

fn conversion_for(placeholder: PlaceholderType) -> &'static str {
    match placeholder {
        PlaceholderType::Object => "@",
        PlaceholderType::Int => "d",
        PlaceholderType::Float => "f",
        PlaceholderType::Char => "c",
        PlaceholderType::CString => "s",
        PlaceholderType::Unknown => "k",
    }
}

proptest! {
    #[test]
    fn parser_is_total(input in any::<String>()) {
        let types = parse_placeholders(&input);
        prop_assert!(types.len() <= MAX_POSITION.max(input.len()));
    }

    #[test]
    fn parser_is_total_on_format_heavy_input(input in "[%$0-9.+# a-zA-Z@-]{0,40}") {
        let _ = parse_placeholders(&input);
    }

    #[test]
    fn implicit_specifiers_keep_text_order(
        types in prop::collection::vec(placeholder_strategy(), 0..8)
    ) {
        let format = types
            .iter()
            .map(|t| format!("%{}", conversion_for(*t)))
            .collect::<Vec<_>>()
            .join(" and %% ");
        prop_assert_eq!(parse_placeholders(&format), types);
    }

    #[test]
    fn explicit_positions_resolve_by_position(
        types in prop::collection::vec(placeholder_strategy(), 1..8)
    ) {
        // Emit the specifiers back to front.
        let format = types
            .iter()
            .enumerate()
            .rev()
            .map(|(i, t)| format!("%{}${}", i + 1, conversion_for(*t)))
            .collect::<Vec<_>>()
            .join(", ");
        prop_assert_eq!(parse_placeholders(&format), types);
    }

    #[test]
    fn build_is_deterministic_and_ordered(
        keys in prop::collection::vec(key_strategy(), 0..10),
        spaces in 0usize..6,
    ) {
        let mut builder = EnumBuilder::new();
        let mut expected_order: Vec<String> = Vec::new();
        for key in &keys {
            builder.add_entry(Entry::new(key.clone()));
            if !expected_order.contains(key) {
                expected_order.push(key.clone());
            }
        }

        let config = BuildConfig::default().with_indentation(Indentation::Spaces(spaces));
        let first = builder.build_with(&config);
        let second = builder.build_with(&config);
        prop_assert_eq!(&first, &second);

        let names = builder.members().into_iter().map(|m| m.name).collect::<Vec<_>>();
        prop_assert_eq!(names, expected_order);
    }
}
