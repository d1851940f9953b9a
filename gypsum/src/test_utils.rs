use crate::catalogue::Catalogue;
use crate::stat::Relation;
use std::collections::HashMap;

/// Builds a catalogue from `name => (tuple_count, [(attribute, value_count)])`.
pub fn catalogue_for_test(relations: HashMap<&str, (u64, Vec<(&str, u64)>)>) -> Catalogue {
    let mut catalogue = Catalogue::new();

    let mut relations = relations.into_iter().collect::<Vec<_>>();
    relations.sort_by_key(|(name, _)| *name);

    for (name, (tuple_count, attributes)) in relations {
        catalogue.create_relation(name, tuple_count).unwrap();
        for (attribute, value_count) in attributes {
            catalogue
                .create_attribute(name, attribute, value_count)
                .unwrap();
        }
    }

    catalogue
}

pub fn relation_from_json(json: &str) -> Relation {
    serde_json::from_str(json).unwrap()
}
