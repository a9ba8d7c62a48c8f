//! Integration tests for the full pepgraph pipeline
//!
//! feed JSON → typed records → schema + instance graphs → N-Triples / Turtle
//! → parsed back with Sophia → queries.
//!
//! Run with: cargo test --test integration_tests

use std::collections::BTreeMap;

use pepgraph_rdf::load::{graph_from_file, graph_from_rdf};
use pepgraph_rdf::serialize::{serialize, to_ntriples};
use pepgraph_rdf::vocab::{term, RDF_TYPE, XSD_DATE};
use pepgraph_rdf::{convert, convert_with, query, Error, Feed, Graph, Namespaces, RdfFormat};
use pepgraph_rdf::{RdfNode, RdfObject};
use tempfile::tempdir;

const FEED: &str = r#"{
  "1": {
    "number": 1,
    "title": "PEP Purpose and Guidelines",
    "authors": "Barry Warsaw, Jeremy Hylton, David Goodger, Alyssa Coghlan",
    "discussions_to": null,
    "status": "Active",
    "type": "Process",
    "topic": "governance",
    "created": "13-Jun-2000",
    "python_version": null,
    "post_history": "21-Mar-2001, 29-Jul-2002, 03-May-2003, 05-May-2012, 07-Apr-2013",
    "resolution": null,
    "requires": null,
    "replaces": null,
    "superseded_by": null,
    "url": "https://peps.python.org/pep-0001/"
  },
  "8": {
    "number": 8,
    "title": "Style Guide for Python Code",
    "authors": "Guido van Rossum, Barry Warsaw, Alyssa Coghlan",
    "discussions_to": null,
    "status": "Active",
    "type": "Process",
    "topic": "",
    "created": "05-Jul-2001",
    "python_version": null,
    "post_history": "05-Jul-2001, 01-Aug-2013",
    "resolution": null,
    "requires": null,
    "replaces": null,
    "superseded_by": null,
    "url": "https://peps.python.org/pep-0008/"
  },
  "100": {
    "number": 100,
    "title": "Python Unicode Integration",
    "authors": "Marc-André Lemburg",
    "status": "Final",
    "type": "Standards Track",
    "created": "10-Mar-2000",
    "python_version": "2.0",
    "superseded_by": 3000,
    "url": "https://peps.python.org/pep-0100/"
  },
  "484": {
    "number": 484,
    "title": "Type Hints",
    "authors": "Guido van Rossum, Jukka Lehtosalo, Łukasz Langa",
    "discussions_to": "python-ideas@python.org",
    "status": "Final",
    "type": "Standards Track",
    "topic": "typing",
    "created": "29-Sep-2014",
    "python_version": "3.5",
    "post_history": "`16-Jan-2015 <https://mail.python.org/archives/list/python-dev@python.org/thread/A/>`__, `20-Mar-2015 <https://mail.python.org/archives/list/python-dev@python.org/thread/B/>`__",
    "resolution": "`21-May-2015 <https://mail.python.org/archives/list/python-dev@python.org/message/C/>`__",
    "requires": "483",
    "replaces": null,
    "superseded_by": null,
    "url": "https://peps.python.org/pep-0484/"
  },
  "483": {
    "number": 483,
    "title": "The Theory of Type Hints",
    "authors": "Guido van Rossum, Ivan Levkivskyi",
    "status": "Final",
    "type": "Informational",
    "topic": "typing",
    "created": "19-Dec-2014",
    "post_history": "",
    "resolution": "https://mail.python.org/pipermail/python-dev/2015-May/140104.html",
    "url": "https://peps.python.org/pep-0483/"
  },
  "3000": {
    "number": 3000,
    "title": "Python 3000",
    "authors": "Guido van Rossum",
    "status": "Final",
    "type": "Process",
    "created": "05-Apr-2006",
    "replaces": "100, 101",
    "resolution": "see mailing list",
    "url": "https://peps.python.org/pep-3000/"
  }
}"#;

fn feed() -> Feed {
    Feed::from_json_str(FEED).expect("sample feed parses")
}

fn count_predicate(graph: &Graph, ns: &Namespaces, name: &str) -> usize {
    let predicate = ns.term(name);
    graph.matching(None, Some(&predicate), None).count()
}

fn predicate_histogram(graph: &Graph) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for t in graph {
        *out.entry(t.predicate.clone()).or_insert(0) += 1;
    }
    out
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_feed_converts_with_expected_shape() {
    let ns = Namespaces::default();
    let graphs = convert(&feed()).unwrap();
    let g = &graphs.instances;

    let proposal = RdfObject::Node(ns.term_node(term::PROPOSAL));
    assert_eq!(g.subjects(RDF_TYPE, &proposal).count(), 6);

    // 4 + 3 + 1 + 3 + 2 + 1 authorships over 9 distinct people.
    assert_eq!(count_predicate(g, &ns, term::HAS_AUTHOR), 14);
    let author = RdfObject::Node(ns.term_node(term::AUTHOR));
    assert_eq!(g.subjects(RDF_TYPE, &author).count(), 9);

    // Empty topic on PEP 8 is absent, not an empty literal.
    assert_eq!(count_predicate(g, &ns, term::TOPIC), 3);

    // Only 100 and 484 carry a python version.
    assert_eq!(count_predicate(g, &ns, term::PYTHON_VERSION), 2);
    assert_eq!(count_predicate(g, &ns, term::DISCUSSIONS_TO), 1);
}

#[test]
fn test_numeric_superseded_by_links_to_proposal() {
    let ns = Namespaces::default();
    let g = convert(&feed()).unwrap().instances;
    assert!(g.contains(
        &ns.pep("100"),
        &ns.term(term::SUPERSEDED_BY),
        &RdfObject::Node(ns.pep("3000"))
    ));
}

#[test]
fn test_replaces_list_yields_one_link_per_id() {
    let ns = Namespaces::default();
    let g = convert(&feed()).unwrap().instances;
    let replaces = ns.term(term::REPLACES);
    let targets: Vec<_> = g
        .objects(&ns.pep("3000"), &replaces)
        .filter_map(RdfObject::as_node)
        .cloned()
        .collect();
    assert_eq!(targets, [ns.pep("100"), ns.pep("101")]);

    // 101 is not in the feed: the link dangles and the node is untyped.
    assert!(g.matching(Some(&ns.pep("101")), None, None).next().is_none());
}

#[test]
fn test_resolution_shapes() {
    let ns = Namespaces::default();
    let g = convert(&feed()).unwrap().instances;
    let has_resolution = ns.term(term::HAS_RESOLUTION);

    // Hyperlinked date: url + date.
    let node = g
        .objects(&ns.pep("484"), &has_resolution)
        .find_map(RdfObject::as_node)
        .cloned()
        .expect("484 has a resolution");
    let date = g.literal(&node, &ns.term(term::RESOLUTION_DATE)).unwrap();
    assert_eq!(date.lexical, "2015-05-21");
    assert_eq!(date.datatype.as_deref(), Some(XSD_DATE));
    assert!(g
        .literal(&node, &ns.term(term::RESOLUTION_URL))
        .is_some_and(|u| u.lexical.ends_with("/message/C/")));

    // Bare URL: url only.
    let node = g
        .objects(&ns.pep("483"), &has_resolution)
        .find_map(RdfObject::as_node)
        .cloned()
        .expect("483 has a resolution");
    assert!(g.literal(&node, &ns.term(term::RESOLUTION_URL)).is_some());
    assert!(g.literal(&node, &ns.term(term::RESOLUTION_DATE)).is_none());

    // Free text: no resolution node at all.
    assert_eq!(g.objects(&ns.pep("3000"), &has_resolution).count(), 0);
    assert_eq!(count_predicate(&g, &ns, term::HAS_RESOLUTION), 2);
}

#[test]
fn test_post_history_shapes() {
    let ns = Namespaces::default();
    let g = convert(&feed()).unwrap().instances;
    let has_post = ns.term(term::HAS_POST);

    assert_eq!(g.objects(&ns.pep("1"), &has_post).count(), 5);
    assert_eq!(g.objects(&ns.pep("8"), &has_post).count(), 2);
    assert_eq!(g.objects(&ns.pep("484"), &has_post).count(), 2);
    assert_eq!(g.objects(&ns.pep("483"), &has_post).count(), 0);

    // Only the hyperlinked history carries post URLs.
    assert_eq!(count_predicate(&g, &ns, term::POST_URL), 2);
    assert_eq!(count_predicate(&g, &ns, term::POST_DATE), 9);
}

#[test]
fn test_conversion_is_idempotent() {
    let f = feed();
    let a = convert(&f).unwrap();
    let b = convert(&f).unwrap();
    assert_eq!(a, b);
    assert_eq!(to_ntriples(&a.instances), to_ntriples(&b.instances));
}

#[test]
fn test_invalid_created_date_aborts() {
    let text = FEED.replace("\"13-Jun-2000\"", "\"invalid-date\"");
    let f = Feed::from_json_str(&text).unwrap();
    match convert(&f) {
        Err(Error::InvalidDate { pep, field, value, .. }) => {
            assert_eq!(pep, 1);
            assert_eq!(field, "created");
            assert_eq!(value, "invalid-date");
        }
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn test_custom_namespaces() {
    let ns = Namespaces::new("https://example.org/vocab#", "https://example.org/pep/").unwrap();
    let g = convert_with(&feed(), &ns).unwrap();
    assert!(g.instances.matching(Some(&ns.pep("8")), None, None).next().is_some());
    assert!(g
        .instances
        .matching(Some(&RdfNode::iri("https://python.org/peps/pep-8")), None, None)
        .next()
        .is_none());
}

// ============================================================================
// Serialize → read back
// ============================================================================

#[test]
fn test_ntriples_round_trip_through_sophia() {
    let ns = Namespaces::default();
    let graphs = convert(&feed()).unwrap();
    for graph in [&graphs.schema, &graphs.instances] {
        let nt = serialize(graph, RdfFormat::NTriples, &ns);
        let back = graph_from_rdf(nt.as_bytes(), RdfFormat::NTriples).unwrap();
        assert_eq!(&back, graph);
    }
}

#[test]
fn test_turtle_round_trip_through_sophia() {
    let ns = Namespaces::default();
    let graphs = convert(&feed()).unwrap();
    let ttl = serialize(&graphs.instances, RdfFormat::Turtle, &ns);
    let back = graph_from_rdf(ttl.as_bytes(), RdfFormat::Turtle).unwrap();
    assert_eq!(back.len(), graphs.instances.len());
    assert_eq!(predicate_histogram(&back), predicate_histogram(&graphs.instances));
    assert_eq!(back, graphs.instances);
}

#[test]
fn test_written_files_reload() {
    let dir = tempdir().unwrap();
    let ns = Namespaces::default();
    let graphs = convert(&feed()).unwrap();

    let schema_path = dir.path().join("schema.ttl");
    let data_path = dir.path().join("data.nt");
    std::fs::write(&schema_path, serialize(&graphs.schema, RdfFormat::Turtle, &ns)).unwrap();
    std::fs::write(&data_path, serialize(&graphs.instances, RdfFormat::NTriples, &ns)).unwrap();

    assert_eq!(graph_from_file(&schema_path).unwrap(), graphs.schema);
    assert_eq!(graph_from_file(&data_path).unwrap(), graphs.instances);
    assert!(graph_from_file(&dir.path().join("data.json")).is_err());
}

// ============================================================================
// Queries over a reloaded graph
// ============================================================================

#[test]
fn test_queries_after_reload() {
    let ns = Namespaces::default();
    let graphs = convert(&feed()).unwrap();
    let ttl = serialize(&graphs.instances, RdfFormat::Turtle, &ns);
    let g = graph_from_rdf(ttl.as_bytes(), RdfFormat::Turtle).unwrap();

    let dist = query::status_distribution(&g, &ns);
    assert_eq!(dist.get("Active"), Some(&2));
    assert_eq!(dist.get("Final"), Some(&4));

    let sup = query::supersessions(&g, &ns);
    assert_eq!(sup.len(), 1);
    assert_eq!((sup[0].from.number, sup[0].to.number), (100, 3000));

    let deps = query::dependencies(&g, &ns);
    assert_eq!(deps.len(), 1);
    assert_eq!((deps[0].from.number, deps[0].to.number), (484, 483));

    let guido: Vec<u32> = query::peps_by_author(&g, &ns, "Guido van Rossum")
        .iter()
        .map(|p| p.number)
        .collect();
    assert_eq!(guido, [8, 3000, 484, 483]);

    let contributions = query::author_contributions(&g, &ns, 484);
    assert_eq!(contributions.len(), 3);
    assert_eq!(contributions["Guido van Rossum"].len(), 4);
    assert_eq!(contributions["Łukasz Langa"].len(), 1);
}
