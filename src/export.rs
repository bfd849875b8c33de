//! Annotated graph export — Cypher DUMP, GraphML and JSON.
//!
//! ```text
//! AnnotatedGraph → export_cypher_dump() → CREATE/MATCH statements
//!                → export_graphml()     → graph viewers (Gephi, yEd, igraph)
//!                → export_json()        → anything that reads serde JSON
//! ```
//!
//! Every format keeps vertex labels, edge weights, per-vertex `clusters`
//! and per-edge `interior`.

use std::io::Write;

use crate::graph::AnnotatedGraph;
use crate::model::*;
use crate::Result;

// ============================================================================
// Cypher
// ============================================================================

/// Export the graph as a Cypher DUMP script.
///
/// One `CREATE` per card and one `MATCH ... CREATE` per co-occurrence edge.
pub fn export_cypher_dump(graph: &AnnotatedGraph, writer: &mut dyn Write) -> Result<()> {
    // Header
    writeln!(writer, "// archetype-graph Cypher DUMP")?;
    writeln!(writer, "// Cards: {}", graph.vertices.len())?;
    writeln!(writer, "// Co-occurrences: {}", graph.edges.len())?;
    writeln!(writer, "// Clusters: {}", graph.cluster_count)?;
    writeln!(writer)?;

    for vertex in &graph.vertices {
        let props = graph.vertex_properties(vertex);
        writeln!(
            writer,
            "CREATE (:Card {{_id: {}, {}}});",
            vertex.id,
            format_properties(&props),
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Relationships")?;

    for edge in &graph.edges {
        let props = graph.edge_properties(edge);
        writeln!(
            writer,
            "MATCH (a:Card {{_id: {}}}), (b:Card {{_id: {}}}) CREATE (a)-[:COOCCURS {{{}}}]->(b);",
            edge.src,
            edge.dst,
            format_properties(&props),
        )?;
    }

    Ok(())
}

/// Format a PropertyMap as Cypher property string (key: value, ...).
fn format_properties(props: &PropertyMap) -> String {
    props
        .iter()
        .map(|(key, value)| format!("{}: {}", key, format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a Value as a Cypher literal.
fn format_value(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Value::Int(i) => i.to_string(),
        Value::Ids(ids) => {
            let inner: Vec<String> = ids.iter().map(u32::to_string).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

// ============================================================================
// GraphML
// ============================================================================

/// Export the graph as GraphML.
///
/// `clusters` is written as comma-separated ids, `interior` as 0/1.
pub fn export_graphml(graph: &AnnotatedGraph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#)?;
    writeln!(writer, r#"  <key id="label" for="node" attr.name="label" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <key id="decks" for="node" attr.name="decks" attr.type="long"/>"#)?;
    writeln!(writer, r#"  <key id="clusters" for="node" attr.name="clusters" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <key id="weight" for="edge" attr.name="weight" attr.type="long"/>"#)?;
    writeln!(writer, r#"  <key id="interior" for="edge" attr.name="interior" attr.type="long"/>"#)?;
    writeln!(writer, r#"  <graph id="G" edgedefault="undirected">"#)?;

    for vertex in &graph.vertices {
        writeln!(writer, r#"    <node id="n{}">"#, vertex.id)?;
        for (key, value) in graph.vertex_properties(vertex) {
            writeln!(writer, r#"      <data key="{}">{}</data>"#, key, escape_xml(&value.to_string()))?;
        }
        writeln!(writer, "    </node>")?;
    }

    for edge in &graph.edges {
        writeln!(
            writer,
            r#"    <edge id="e{}" source="n{}" target="n{}">"#,
            edge.id, edge.src, edge.dst
        )?;
        for (key, value) in graph.edge_properties(edge) {
            writeln!(writer, r#"      <data key="{}">{}</data>"#, key, escape_xml(&value.to_string()))?;
        }
        writeln!(writer, "    </edge>")?;
    }

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// JSON
// ============================================================================

/// Export the graph as pretty-printed JSON.
pub fn export_json(graph: &AnnotatedGraph, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, graph)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::from("Opt")), "'Opt'");
        assert_eq!(format_value(&Value::from("Ajani's Pridemate")), "'Ajani\\'s Pridemate'");
        assert_eq!(format_value(&Value::from(r"a\b")), r"'a\\b'");
        assert_eq!(format_value(&Value::Int(42)), "42");
        assert_eq!(format_value(&Value::Ids(Vec::new())), "[]");
        assert_eq!(format_value(&Value::from(vec![0u32, 3])), "[0, 3]");
    }

    #[test]
    fn test_format_properties_sorted_by_key() {
        let mut props = PropertyMap::new();
        props.insert("weight".into(), Value::Int(3));
        props.insert("interior".into(), Value::Int(1));
        assert_eq!(format_properties(&props), "interior: 1, weight: 3");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Fire & Ice"), "Fire &amp; Ice");
        assert_eq!(escape_xml("<\"'>"), "&lt;&quot;&apos;&gt;");
    }
}
