//! Canonical Turtle rendering of an [`RdfModel`].
//!
//! Subjects are written in the order they first appear in the store, one block
//! per subject. Blank nodes never appear as free-standing statements when they
//! can be nested: collections become `( ... )`, other singly-referenced blank
//! nodes become `[ ... ]`. Blank nodes that are shared or cyclic keep a label so
//! that no triple is lost.

use std::collections::{BTreeMap, HashMap, HashSet};

use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use tracing::error;

use super::lists::BlankNodeIndex;
use crate::error::{Result, SammError};
use crate::model::ontology::{standard, SammVocabulary};
use crate::store::RdfModel;

/// Nesting depth after which blank nodes are written with labels instead.
const MAX_INLINE_DEPTH: usize = 64;

const INDENT: &str = "    ";

/// Options for [`TurtleSerializer`].
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    /// Language the editor displays; example values are written with this tag.
    pub display_language: Option<String>,
}

/// Renders one model as Turtle.
pub struct TurtleSerializer<'a> {
    model: &'a RdfModel,
    options: SerializerOptions,
}

impl<'a> TurtleSerializer<'a> {
    pub fn new(model: &'a RdfModel, options: SerializerOptions) -> Self {
        Self { model, options }
    }

    /// Render the model. Fails only if the prefix table is malformed.
    pub fn serialize(&self) -> Result<String> {
        let prefixes = self.prefix_table()?;
        let mut writer = TurtleWriter {
            out: String::new(),
            prefixes,
            index: BlankNodeIndex::new(self.model.store()),
            processed: HashSet::new(),
            emitted_blanks: HashSet::new(),
            vocab: self.model.samm(),
            display_language: self.options.display_language.as_deref(),
        };
        writer.write_prefixes();
        writer.write_statements();
        Ok(writer.out)
    }

    /// The model's prefixes with `xsd:` and the SAMM alias pinned to their namespaces.
    fn prefix_table(&self) -> Result<BTreeMap<String, String>> {
        let samm_ns = self.model.samm().samm_ns();
        let alias = self.model.samm_alias();

        let mut table = self.model.prefixes().clone();
        table.retain(|prefix, iri| {
            !((iri.as_str() == standard::XSD && prefix != "xsd")
                || (iri.as_str() == samm_ns && prefix != alias))
        });
        table.insert("xsd".to_string(), standard::XSD.to_string());
        table.insert(alias.to_string(), samm_ns.to_string());

        for (prefix, iri) in &table {
            if !is_prefix_name(prefix) {
                return Err(SammError::Serialization(format!(
                    "invalid prefix name '{prefix}'"
                )));
            }
            NamedNode::new(iri.as_str()).map_err(|e| {
                SammError::Serialization(format!("invalid IRI for prefix '{prefix}': {e}"))
            })?;
        }
        Ok(table)
    }
}

/// Render `model` as Turtle, or return an empty string if that is impossible.
///
/// An empty result always means failure: even an empty model renders its prefixes.
pub fn serialize_model(model: &RdfModel, options: &SerializerOptions) -> String {
    match TurtleSerializer::new(model, options.clone()).serialize() {
        Ok(text) => text,
        Err(e) => {
            error!("Could not serialize model: {e}");
            String::new()
        }
    }
}

struct TurtleWriter<'a> {
    out: String,
    prefixes: BTreeMap<String, String>,
    index: BlankNodeIndex<'a>,
    /// Positions of triples already written.
    processed: HashSet<usize>,
    /// Blank nodes whose triples are being or have been written.
    emitted_blanks: HashSet<&'a str>,
    vocab: &'a SammVocabulary,
    display_language: Option<&'a str>,
}

impl<'a> TurtleWriter<'a> {
    /// Write all registered prefixes, sorted.
    fn write_prefixes(&mut self) {
        for (prefix, iri) in &self.prefixes {
            self.out.push_str(&format!("@prefix {prefix}: <{iri}> .\n"));
        }
        if !self.prefixes.is_empty() {
            self.out.push('\n');
        }
    }

    fn write_statements(&mut self) {
        let triples: Vec<&'a Triple> = self.index.triples().to_vec();
        let mut groups: Vec<&'a NamedOrBlankNode> = Vec::new();
        let mut positions: HashMap<&'a NamedOrBlankNode, Vec<usize>> = HashMap::new();
        for (position, triple) in triples.into_iter().enumerate() {
            let entry = positions.entry(&triple.subject).or_default();
            if entry.is_empty() {
                groups.push(&triple.subject);
            }
            entry.push(position);
        }

        for &subject in &groups {
            match subject {
                NamedOrBlankNode::NamedNode(node) => {
                    let text = self.compact_iri(node.as_str());
                    self.write_block(text, &positions[&subject]);
                }
                NamedOrBlankNode::BlankNode(blank) => {
                    if self.index.reference_count(blank) == 0 {
                        self.write_anonymous_block(blank);
                    }
                }
            }
        }

        // Shared and cyclic blank nodes: roots of shared structures first.
        for pass in [false, true] {
            for &subject in &groups {
                let NamedOrBlankNode::BlankNode(blank) = subject else {
                    continue;
                };
                let shared = self.index.reference_count(blank) != 1;
                if (shared || pass) && !self.emitted_blanks.contains(blank.as_str()) {
                    let pending: Vec<usize> = positions[&subject]
                        .iter()
                        .copied()
                        .filter(|p| !self.processed.contains(p))
                        .collect();
                    if !pending.is_empty() {
                        self.emitted_blanks.insert(blank.as_str());
                        self.write_block(format!("_:{}", blank.as_str()), &pending);
                    }
                }
            }
        }
    }

    /// `subject p o ; p o .` for the given triple positions.
    fn write_block(&mut self, subject: String, positions: &[usize]) {
        let entries = self.predicate_objects(positions, 1);
        if entries.is_empty() {
            return;
        }
        self.out.push_str(&subject);
        for (i, (predicate, objects)) in entries.iter().enumerate() {
            if i == 0 {
                self.out.push(' ');
            } else {
                self.out.push_str(" ;\n");
                self.out.push_str(INDENT);
            }
            self.out.push_str(predicate);
            self.out.push(' ');
            self.out.push_str(&objects.join(", "));
        }
        self.out.push_str(" .\n\n");
    }

    /// `[ p o ; p o ] .` for a blank subject nothing refers to.
    fn write_anonymous_block(&mut self, blank: &'a BlankNode) {
        self.emitted_blanks.insert(blank.as_str());
        let positions: Vec<usize> = self.index.outgoing(blank).to_vec();
        let record = self.record_text(&positions, 1);
        self.out.push_str(&record);
        self.out.push_str(" .\n\n");
    }

    /// Render predicate/object pairs, merging consecutive equal predicates.
    fn predicate_objects(&mut self, positions: &[usize], depth: usize) -> Vec<(String, Vec<String>)> {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for &position in positions {
            if !self.processed.insert(position) {
                continue;
            }
            let triple = self.index.triple(position);
            let predicate = self.predicate_text(&triple.predicate);
            let object = self.object_text(&triple.predicate, &triple.object, depth);
            match entries.last_mut() {
                Some((last, objects)) if *last == predicate => objects.push(object),
                _ => entries.push((predicate, vec![object])),
            }
        }
        entries
    }

    fn record_text(&mut self, positions: &[usize], depth: usize) -> String {
        let entries = self.predicate_objects(positions, depth);
        if entries.is_empty() {
            return "[]".to_string();
        }
        let body: Vec<String> = entries
            .into_iter()
            .map(|(predicate, objects)| format!("{predicate} {}", objects.join(", ")))
            .collect();
        format!("[ {} ]", body.join(" ; "))
    }

    fn predicate_text(&self, predicate: &NamedNode) -> String {
        if predicate.as_str() == standard::RDF_TYPE {
            "a".to_string()
        } else {
            self.compact_iri(predicate.as_str())
        }
    }

    fn object_text(&mut self, predicate: &NamedNode, object: &'a Term, depth: usize) -> String {
        match object {
            Term::NamedNode(node) if node.as_str() == standard::RDF_NIL => "()".to_string(),
            Term::NamedNode(node) => self.compact_iri(node.as_str()),
            Term::BlankNode(blank) => self.blank_text(blank, depth),
            Term::Literal(literal) => self.literal_text(predicate, literal),
            #[allow(unreachable_patterns)]
            other => other.to_string(),
        }
    }

    /// Inline a blank object as a collection or record when that loses nothing.
    fn blank_text(&mut self, blank: &'a BlankNode, depth: usize) -> String {
        let label = format!("_:{}", blank.as_str());
        if depth >= MAX_INLINE_DEPTH
            || self.index.reference_count(blank) != 1
            || self.emitted_blanks.contains(blank.as_str())
        {
            return label;
        }
        self.emitted_blanks.insert(blank.as_str());

        if let Some(list) = self.index.resolve_list(blank) {
            self.processed.extend(list.cells.iter().copied());
            let first = NamedNode::new_unchecked(standard::RDF_FIRST);
            let mut items = Vec::with_capacity(list.items.len());
            for item in list.items {
                items.push(self.object_text(&first, item, depth + 1));
            }
            return format!("( {} )", items.join(" "));
        }

        let positions: Vec<usize> = self.index.outgoing(blank).to_vec();
        self.record_text(&positions, depth + 1)
    }

    fn literal_text(&self, predicate: &NamedNode, literal: &Literal) -> String {
        let value = escape_literal(literal.value());
        if let Some(language) = literal.language() {
            let language = match self.display_language {
                Some(display) if self.vocab.is_example_value_predicate(predicate.as_str()) => {
                    display
                }
                _ => language,
            };
            return format!("\"{value}\"@{language}");
        }
        let datatype = literal.datatype();
        if datatype.as_str() == standard::XSD_STRING {
            format!("\"{value}\"")
        } else {
            format!("\"{value}\"^^{}", self.compact_iri(datatype.as_str()))
        }
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        // Find longest matching prefix
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in &self.prefixes {
            if iri.starts_with(ns.as_str())
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((prefix.as_str(), ns.as_str()));
            }
        }
        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            if is_local_name(local) {
                return format!("{prefix}:{local}");
            }
        }
        format!("<{iri}>")
    }
}

/// `PN_PREFIX`, restricted to ASCII; the empty prefix is allowed.
fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() => {
            !prefix.ends_with('.')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }
        Some(_) => false,
    }
}

/// Local names we compact: ASCII alphanumerics, `_` and `-`, never starting with `-`.
fn is_local_name(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('-')
        && local.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Control chars: \uXXXX
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}
