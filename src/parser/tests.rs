use crate::error::{ParseError, RefKind};
use crate::parser::api::parse_document;
use crate::position::Position;
use crate::scene::{Ref, Value};

#[test]
fn test_nested_document() {
    let input = "scene v1\n\
                 node world main @1 {\n\
                   gravity = -9.81 // m/s^2\n\
                   node camera cam #1 {\n\
                     fov = 70\n\
                     target = <world:main @1>\n\
                   }\n\
                   tags = [\"a\", \"b\"]\n\
                 }\n\
                 node light sun @2 {}\n";

    let scene = parse_document(input).expect("Failed to parse");
    assert_eq!(scene.roots.len(), 2);

    let world = scene.get_root_by_name("main").unwrap();
    assert_eq!(world.get_property::<f64>("gravity"), Some(-9.81));
    assert_eq!(world.get_list("tags").map(<[Value]>::len), Some(2));

    let cam = world.get_child_by_name("cam").unwrap();
    assert_eq!(cam.local_id, Some(1));
    assert_eq!(cam.get_property::<i64>("fov"), Some(70));
    assert_eq!(
        cam.get_ref("target"),
        Some(&Ref::global(Some("world"), Some("main"), 1))
    );

    let sun = scene.get_root_by_global_id(2).unwrap();
    assert_eq!(sun.node_type, "light");
    assert!(sun.properties.is_empty());
}

#[test]
fn test_child_referencing_ancestor_is_not_a_cycle() {
    // Only the child holds an edge; nothing points back at it
    let input = "scene v1 node world main @1 { node cam c { target = <world:main@1> } }";
    assert!(parse_document(input).is_ok());
}

#[test]
fn test_self_reference_is_rejected() {
    let input = "scene v1\nnode mesh cube @1 {\n  me = <mesh:cube @1>\n}\n";
    let err = parse_document(input).unwrap_err();
    assert_eq!(
        err,
        ParseError::CircularReference {
            position: Position::new(3, 8),
            from: "mesh cube".to_string(),
            to: "mesh cube".to_string(),
            kind: RefKind::Global,
        }
    );
}

#[test]
fn test_back_reference_closes_cycle() {
    // y -> x is recorded first, then x -> y closes the loop
    let input = "scene v1\n\
                 node B x @2 {\n\
                   node A y @1 { t = <B:x@2> }\n\
                   back = <A:y@1>\n\
                 }\n";
    let err = parse_document(input).unwrap_err();
    assert!(err.is_circular_reference());
    match err {
        ParseError::CircularReference { from, to, kind, .. } => {
            assert_eq!(from, "B x");
            assert_eq!(to, "A y");
            assert_eq!(kind, RefKind::Global);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_local_cycle() {
    let input = "scene v1 node bone a #1 { node bone b #2 { up = <bone#1> } down = <bone#2> }";
    match parse_document(input) {
        Err(ParseError::CircularReference { kind, .. }) => assert_eq!(kind, RefKind::Local),
        other => panic!("expected local cycle, got {other:?}"),
    }
}

#[test]
fn test_forward_references_are_tolerated() {
    // Both directions exist, but the first one is forward and never becomes an edge
    let input = "scene v1\n\
                 node A a @1 { next = <B:b@2> }\n\
                 node B b @2 { prev = <A:a@1> }\n";
    let scene = parse_document(input).expect("forward reference should parse");
    assert_eq!(scene.roots.len(), 2);
}

#[test]
fn test_dangling_reference_is_kept() {
    let scene = parse_document("scene v1 node a b { r = <Mesh:Nope@99> }").unwrap();
    let node = &scene.roots[0];
    let r = node.get_ref("r").unwrap();
    assert_eq!(r.global_id, Some(99));
    assert!(node.resolve_reference(r, &scene).is_none());
}

#[test]
fn test_duplicate_global_id_last_wins() {
    // The second @1 replaces the first for later references
    let input = "scene v1\n\
                 node t first @1 {}\n\
                 node t second @1 { me = <t:second@1> }\n";
    assert!(parse_document(input)
        .unwrap_err()
        .to_string()
        .contains("'t second' -> 't second'"));
}

#[test]
fn test_reference_inside_nested_list_is_checked() {
    let input = "scene v1 node a b @3 { xs = [1, [<a:b@3>]] }";
    assert!(parse_document(input).unwrap_err().is_circular_reference());
}

#[test]
fn test_syntax_error_wins_over_cycle() {
    // The grammar rejects the document before any reference is checked
    let input = "scene v1 node a b @1 { me = <a:b@1> } }";
    assert!(matches!(
        parse_document(input),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn test_comments_and_whitespace_are_ignored() {
    let input = "// header comment\nscene   v1\n\n\tnode a b{x=1// trailing\n}";
    let scene = parse_document(input).unwrap();
    assert_eq!(scene.roots[0].get_property::<i64>("x"), Some(1));
}

#[test]
fn test_property_without_value_is_an_error() {
    assert!(parse_document("scene v1 node a b { x = }").is_err());
    assert!(parse_document("scene v1 node a b { x }").is_err());
}

#[test]
fn test_empty_document_body() {
    let scene = parse_document("scene v1\n").unwrap();
    assert!(scene.is_empty());
    assert!(parse_document("").is_err());
}
