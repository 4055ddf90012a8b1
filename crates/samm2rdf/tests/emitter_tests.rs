use oxrdf::{Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use samm2rdf::emitter::turtle::{serialize_model, SerializerOptions, TurtleSerializer};
use samm2rdf::emitter::TriplesEmitter;
use samm2rdf::model::ontology::{samm, standard};
use samm2rdf::store::loader::load_turtle;
use samm2rdf::store::{RdfModel, RdfStore};
use samm2rdf::SammError;

const HEADER: &str = "\
@prefix : <urn:samm:com.example:1.0.0#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix samm: <urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#> .
@prefix samm-c: <urn:samm:org.eclipse.esmf.samm:characteristic:2.1.0#> .
@prefix samm-e: <urn:samm:org.eclipse.esmf.samm:entity:2.1.0#> .
@prefix unit: <urn:samm:org.eclipse.esmf.samm:unit:2.1.0#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

";

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("urn:samm:com.example:1.0.0#{local}"))
}

fn subject(local: &str) -> NamedOrBlankNode {
    ex(local).into()
}

fn rdf_type() -> NamedNode {
    NamedNode::new_unchecked(standard::RDF_TYPE)
}

fn new_model() -> RdfModel {
    RdfModel::new("com.example:1.0.0", "2.1.0")
}

fn serialize(model: &RdfModel) -> String {
    serialize_model(model, &SerializerOptions::default())
}

/// Triples rendered with blank nodes replaced by a description of their content.
fn canonical(store: &RdfStore) -> Vec<String> {
    fn describe(store: &RdfStore, term: &Term, depth: usize) -> String {
        match term {
            Term::BlankNode(blank) if depth < 32 => {
                let node: NamedOrBlankNode = blank.clone().into();
                let mut parts: Vec<String> = store
                    .triples_matching(Some(&node), None, None)
                    .map(|t| format!("{} {}", t.predicate, describe(store, &t.object, depth + 1)))
                    .collect();
                parts.sort();
                format!("[{}]", parts.join(" ; "))
            }
            other => other.to_string(),
        }
    }
    let mut lines: Vec<String> = store
        .iter()
        .map(|t| {
            let subject = match &t.subject {
                NamedOrBlankNode::NamedNode(node) => node.to_string(),
                NamedOrBlankNode::BlankNode(blank) => describe(store, &blank.clone().into(), 0),
            };
            format!("{subject} {} {}", t.predicate, describe(store, &t.object, 0))
        })
        .collect();
    lines.sort();
    lines
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn aspect_with_property_list() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    let foo = subject("Foo");
    model.emit_iri(&foo, &rdf_type(), &vocab.samm(samm::ASPECT));
    model.emit_list(&foo, &vocab.samm(samm::PROPERTIES), vec![ex("bar").into()]);
    model.emit_list(&foo, &vocab.samm(samm::OPERATIONS), Vec::new());

    let expected = format!(
        "{HEADER}:Foo a samm:Aspect ;\n    samm:properties ( :bar ) ;\n    samm:operations () .\n\n"
    );
    assert_eq!(serialize(&model), expected);
}

#[test]
fn empty_model_still_renders_prefixes() {
    assert_eq!(serialize(&new_model()), HEADER);
}

#[test]
fn repeated_predicates_are_merged() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    let foo = subject("Foo");
    let see = vocab.samm(samm::SEE);
    model.emit_iri(&foo, &see, &NamedNode::new_unchecked("http://example.com/a"));
    model.emit_iri(&foo, &see, &NamedNode::new_unchecked("http://example.com/b"));

    let text = serialize(&model);
    assert!(
        text.contains(":Foo samm:see <http://example.com/a>, <http://example.com/b> ."),
        "{text}"
    );
}

#[test]
fn blank_record_is_inlined() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    let blank = model.fresh_blank_node();
    let record: NamedOrBlankNode = blank.clone().into();
    model.emit_iri(&record, &vocab.samm(samm::PROPERTY_PRED), &ex("position"));
    model.emit_bool(&record, &vocab.samm(samm::OPTIONAL), true);
    model.emit_list(&subject("Movement"), &vocab.samm(samm::PROPERTIES), vec![blank.into()]);

    let text = serialize(&model);
    assert!(
        text.contains(
            ":Movement samm:properties ( [ samm:property :position ; samm:optional \"true\"^^xsd:boolean ] ) ."
        ),
        "{text}"
    );
    assert!(!text.contains("_:"), "{text}");
}

#[test]
fn unreferenced_blank_subject_is_top_level_record() {
    let mut model = new_model();
    let blank: NamedOrBlankNode = model.fresh_blank_node().into();
    model.emit_literal(&blank, &ex("label"), "anonymous");

    let text = serialize(&model);
    assert!(text.ends_with("[ :label \"anonymous\" ] .\n\n"), "{text}");
}

#[test]
fn shared_blank_node_keeps_label() {
    let mut model = new_model();
    let blank = model.fresh_blank_node();
    let shared: NamedOrBlankNode = blank.clone().into();
    model.emit_literal(&shared, &ex("label"), "shared");
    model.emit_triple(Triple::new(ex("A"), ex("ref"), blank.clone()));
    model.emit_triple(Triple::new(ex("B"), ex("ref"), blank));

    let text = serialize(&model);
    assert!(text.contains(":A :ref _:b0 ."), "{text}");
    assert!(text.contains(":B :ref _:b0 ."), "{text}");
    assert!(text.contains("_:b0 :label \"shared\" ."), "{text}");

    let parsed = load_turtle(&text, None).unwrap();
    assert_eq!(canonical(parsed.store()), canonical(model.store()));
}

#[test]
fn cyclic_blank_nodes_terminate() {
    let mut model = new_model();
    let a = model.fresh_blank_node();
    let b = model.fresh_blank_node();
    model.emit_triple(Triple::new(a.clone(), ex("next"), b.clone()));
    model.emit_triple(Triple::new(b, ex("next"), a));

    let text = serialize(&model);
    let parsed = load_turtle(&text, None).unwrap();
    assert_eq!(parsed.store().len(), 2);
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn literal_forms() {
    let mut model = new_model();
    let foo = subject("Foo");
    model.emit_literal(&foo, &ex("plain"), "say \"hi\"\n");
    model.emit_lang_literal(&foo, &ex("tagged"), "Hallo", "DE");
    model.emit_int(&foo, &ex("count"), 42, standard::XSD_INTEGER);

    let text = serialize(&model);
    assert!(text.contains(":plain \"say \\\"hi\\\"\\n\""), "{text}");
    assert!(text.contains(":tagged \"Hallo\"@de"), "{text}");
    assert!(text.contains(":count \"42\"^^xsd:integer"), "{text}");
}

#[test]
fn example_value_uses_display_language() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    let speed = subject("speed");
    model.emit_lang_literal(&speed, &vocab.samm(samm::EXAMPLE_VALUE), "schnell", "en");
    model.emit_lang_literal(&speed, &vocab.samm(samm::PREFERRED_NAME), "speed", "en");

    let options = SerializerOptions {
        display_language: Some("de".to_string()),
    };
    let text = serialize_model(&model, &options);
    assert!(text.contains("samm:exampleValue \"schnell\"@de"), "{text}");
    assert!(text.contains("samm:preferredName \"speed\"@en"), "{text}");

    // The stored literal is untouched.
    let stored = model
        .store()
        .iter()
        .find(|t| t.predicate == vocab.samm(samm::EXAMPLE_VALUE))
        .unwrap();
    assert_eq!(
        stored.object,
        Term::from(Literal::new_language_tagged_literal_unchecked("schnell", "en"))
    );
}

#[test]
fn example_value_keeps_tag_without_display_language() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    model.emit_lang_literal(&subject("speed"), &vocab.samm(samm::EXAMPLE_VALUE), "fast", "en");
    assert!(serialize(&model).contains("samm:exampleValue \"fast\"@en"));
}

// ---------------------------------------------------------------------------
// Prefixes
// ---------------------------------------------------------------------------

#[test]
fn xsd_and_samm_alias_are_pinned() {
    let mut model = new_model();
    let vocab = model.samm().clone();
    model.add_prefix("x", standard::XSD);
    model.set_samm_alias("bamm");
    let foo = subject("Foo");
    model.emit_iri(&foo, &rdf_type(), &vocab.samm(samm::ASPECT));
    model.emit_int(&foo, &ex("count"), 1, standard::XSD_INTEGER);

    let text = serialize(&model);
    assert!(!text.contains("@prefix x:"), "{text}");
    assert!(!text.contains("@prefix samm:"), "{text}");
    assert!(
        text.contains("@prefix bamm: <urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#> ."),
        "{text}"
    );
    assert!(text.contains(":Foo a bamm:Aspect ;"), "{text}");
    assert!(text.contains("\"1\"^^xsd:integer"), "{text}");
}

#[test]
fn iris_outside_prefixes_are_written_in_full() {
    let mut model = new_model();
    model.emit_iri(
        &subject("Foo"),
        &ex("see"),
        &NamedNode::new_unchecked("http://example.com/docs/page"),
    );
    assert!(serialize(&model).contains(":Foo :see <http://example.com/docs/page> ."));
}

#[test]
fn malformed_prefix_name_yields_empty_string() {
    let mut model = new_model();
    model.add_prefix("1bad", "urn:example:bad#");
    model.emit_literal(&subject("Foo"), &ex("label"), "x");

    assert_eq!(serialize(&model), "");
    let result = TurtleSerializer::new(&model, SerializerOptions::default()).serialize();
    assert!(matches!(result, Err(SammError::Serialization(_))));
}

#[test]
fn malformed_prefix_iri_yields_empty_string() {
    let mut model = new_model();
    model.add_prefix("ok", "not an iri");
    assert_eq!(serialize(&model), "");
}

// ---------------------------------------------------------------------------
// Idempotence and round trip
// ---------------------------------------------------------------------------

#[test]
fn fixture_round_trips() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Movement.ttl");
    let model = samm2rdf::store::loader::load_file(&path).unwrap();
    let text = serialize(&model);
    let parsed = load_turtle(&text, None).unwrap();
    assert_eq!(canonical(parsed.store()), canonical(model.store()));
    // Formatting canonical output changes nothing.
    assert_eq!(serialize(&parsed), text);
}

fn arb_model() -> impl Strategy<Value = RdfModel> {
    prop::collection::vec(
        (0usize..4, 0usize..3, 0usize..6, "[a-zA-Z0-9 \"\\\\\n]{0,6}"),
        0..16,
    )
    .prop_map(|entries| {
        let mut model = new_model();
        for (s, p, kind, text) in entries {
            let subject = subject(&format!("s{s}"));
            let predicate = ex(&format!("p{p}"));
            match kind {
                0 => model.emit_iri(&subject, &predicate, &ex(&format!("o{}", text.len()))),
                1 => model.emit_literal(&subject, &predicate, &text),
                2 => model.emit_lang_literal(&subject, &predicate, &text, "de"),
                3 => model.emit_int(&subject, &predicate, text.len() as i64, standard::XSD_INTEGER),
                4 => {
                    model.emit_list(
                        &subject,
                        &predicate,
                        vec![ex("a").into(), Literal::new_simple_literal(text).into()],
                    );
                }
                _ => {
                    let blank = model.fresh_blank_node();
                    let record: NamedOrBlankNode = blank.clone().into();
                    model.emit_literal(&record, &predicate, &text);
                    model.emit_triple(Triple::new(subject, predicate, blank));
                }
            }
        }
        model
    })
}

proptest! {
    #[test]
    fn serialization_is_idempotent(model in arb_model()) {
        prop_assert_eq!(serialize(&model), serialize(&model));
    }

    #[test]
    fn serialization_round_trips(model in arb_model()) {
        let text = serialize(&model);
        let parsed = load_turtle(&text, None).unwrap();
        prop_assert_eq!(canonical(parsed.store()), canonical(model.store()));
    }
}
