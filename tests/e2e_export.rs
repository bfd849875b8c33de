//! Export tests: Cypher DUMP, GraphML and JSON over an analysed graph.

use archetype_graph::export::{export_cypher_dump, export_graphml, export_json};
use archetype_graph::{AnalysisConfig, AnnotatedGraph, ArchetypeAnalysis, Collection, FixedPartition, ItemId, ItemRegistry};
use pretty_assertions::assert_eq;

/// One bridge card, one name with an apostrophe, one isolated card.
fn analysed() -> AnnotatedGraph {
    let collections: Vec<Collection> = vec![
        ["A", "B"].into_iter().collect(),
        ["B", "Ajani's Pridemate"].into_iter().collect(),
        ["Fire & Ice"].into_iter().collect(),
    ];
    let registry = ItemRegistry::from_collections(&collections);
    let groups: Vec<Vec<ItemId>> = vec![
        vec!["A".into()],
        vec!["B".into()],
        vec!["Ajani's Pridemate".into()],
        vec!["Fire & Ice".into()],
    ];
    let detector = FixedPartition::by_item(&registry, &groups).unwrap();
    let analysis = ArchetypeAnalysis::new(AnalysisConfig::default()).unwrap();
    analysis.run(&collections, &detector).unwrap().annotated
}

fn render(f: fn(&AnnotatedGraph, &mut dyn std::io::Write) -> archetype_graph::Result<()>, g: &AnnotatedGraph) -> String {
    let mut buf = Vec::new();
    f(g, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_cypher_dump_statements() {
    let graph = analysed();
    let dump = render(export_cypher_dump, &graph);

    assert!(dump.starts_with("// archetype-graph Cypher DUMP\n"));
    assert!(dump.contains("// Cards: 4\n"));
    assert!(dump.contains("// Co-occurrences: 2\n"));
    assert!(dump.contains("// Clusters: 4\n"));

    let creates: Vec<&str> = dump.lines().filter(|l| l.starts_with("CREATE (:Card")).collect();
    let matches: Vec<&str> = dump.lines().filter(|l| l.starts_with("MATCH")).collect();
    assert_eq!(creates.len(), 4);
    assert_eq!(matches.len(), 2);

    // B appears in two decks, so it is vertex 0.
    assert_eq!(creates[0], "CREATE (:Card {_id: 0, clusters: [0, 1], decks: 2, label: 'B'});");
    assert!(dump.contains("label: 'Ajani\\'s Pridemate'"));
    assert!(matches.iter().all(|l| l.contains("interior: 1") && l.contains("weight: 1")));
}

#[test]
fn test_graphml_document() {
    let graph = analysed();
    let xml = render(export_graphml, &graph);

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.trim_end().ends_with("</graphml>"));
    assert_eq!(xml.matches("<node ").count(), 4);
    assert_eq!(xml.matches("<edge ").count(), 2);
    assert!(xml.contains(r#"<data key="clusters">0,1</data>"#));
    assert!(xml.contains(r#"<data key="label">Fire &amp; Ice</data>"#));
    assert!(xml.contains(r#"<data key="label">Ajani&apos;s Pridemate</data>"#));
    assert!(xml.contains(r#"<data key="interior">1</data>"#));
}

#[test]
fn test_json_roundtrip() {
    let graph = analysed();
    let json = render(export_json, &graph);
    let back: AnnotatedGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}
