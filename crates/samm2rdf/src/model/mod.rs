pub mod element;
pub mod graph;
pub mod ontology;
pub mod urn;
