//! Property tests for key fallback and argument flattening

use lingo_i18n::{spread, Arg, LocaleRegistry, MemorySource};
use proptest::prelude::*;

fn registry_with_template(template: &str) -> LocaleRegistry {
    let registry = LocaleRegistry::new();
    registry
        .register("en", MemorySource::from_entries([("list", "items", template)]))
        .unwrap();
    registry
}

proptest! {
    #[test]
    fn prop_unknown_keys_degrade_to_themselves(key in "[a-z_]{1,12}(\\.[a-z_]{1,12})?") {
        let registry = LocaleRegistry::new();
        registry.register("en", MemorySource::default()).unwrap();

        prop_assert_eq!(registry.translate("en", &key, &[]), key.clone());
        prop_assert_eq!(registry.translate("zz", &key, &[]), key);
    }

    #[test]
    fn prop_spread_list_fills_each_directive(items in prop::collection::vec("[a-zA-Z0-9 ]{0,8}", 1..6)) {
        let template = vec!["%s"; items.len()].join(",");
        let registry = registry_with_template(&template);

        let translated = registry.translate("en", "list.items", &[spread(items.clone())]);
        prop_assert_eq!(translated, items.join(","));
    }

    #[test]
    fn prop_nil_arguments_never_contribute(
        items in prop::collection::vec("[a-z]{1,6}", 1..5),
        nil_positions in prop::collection::vec(any::<bool>(), 1..5),
    ) {
        let template = vec!["%s"; items.len()].join("|");
        let registry = registry_with_template(&template);

        let plain: Vec<Arg> = items.iter().map(Arg::from).collect();
        let mut with_nils = Vec::new();
        for (i, item) in plain.iter().enumerate() {
            if nil_positions.get(i).copied().unwrap_or(false) {
                with_nils.push(Arg::Nil);
            }
            with_nils.push(item.clone());
        }
        with_nils.push(Arg::Nil);

        prop_assert_eq!(
            registry.translate("en", "list.items", &with_nils),
            registry.translate("en", "list.items", &plain)
        );
    }
}
