//! Translation properties over TypeScript snippets
//!
//! Each case extracts a small program and checks the shape of the control
//! and data flow around the construct under test. Every successful
//! extraction is also run through the structural verifier.

mod common;

use codegraph_flowir::config::ExtractorConfig;
use codegraph_flowir::{EdgeLabel, ErrorKind, GraphStats};
use common::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// Straight-line code
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_straight_line_data_flow() {
    let graph = extract("let a = 1; let b = a + 2; return b;");
    assert_verified(&graph);

    let value = returned_value(&graph);
    assert_eq!(label_of(&graph, value), "+");
    let left = data_inputs(&graph, value, EdgeLabel::Left);
    let right = data_inputs(&graph, value, EdgeLabel::Right);
    assert_eq!(left.len(), 1);
    assert_eq!(label_of(&graph, left[0]), "1");
    assert_eq!(label_of(&graph, right[0]), "2");

    let ret = single(&graph, "return").id;
    assert_eq!(control_out(&graph, graph.start), vec![(EdgeLabel::Next, ret)]);
}

#[test]
fn test_empty_program_gets_implicit_return() {
    let graph = extract("");
    assert_verified(&graph);
    assert_eq!(graph.vertices.len(), 2);
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn test_inner_declaration_shadows_only_its_block() {
    let graph = extract("let x = 1; { let x = 2; } return x;");
    assert_verified(&graph);
    assert_eq!(label_of(&graph, returned_value(&graph)), "1");
}

#[test]
fn test_assignment_in_block_updates_outer_binding() {
    let graph = extract("let x = 1; { x = 2; } return x;");
    assert_verified(&graph);
    assert_eq!(label_of(&graph, returned_value(&graph)), "2");
}

#[test]
fn test_compound_assignment_and_postfix_update() {
    let graph = extract("function f(a) { a += 2; a++; return a; }");
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");

    let value = returned_value(f);
    assert_eq!(label_of(&graph, value), "+");
    let right = data_inputs(&graph, value, EdgeLabel::Right);
    assert_eq!(label_of(&graph, right[0]), "1");

    let inner = data_inputs(&graph, value, EdgeLabel::Left)[0];
    assert_eq!(label_of(&graph, inner), "+");
    let param = data_inputs(&graph, inner, EdgeLabel::Left)[0];
    assert_eq!(label_of(&graph, param), "param (0)");
}

#[test]
fn test_prefix_update_yields_new_value() {
    let graph = extract("function f(a) { let b = ++a; return b; }");
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");
    assert_eq!(label_of(&graph, returned_value(f)), "+");
}

// ═══════════════════════════════════════════════════════════════════════════
// Branches
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_if_else_places_phi() {
    let graph = extract(
        "function f(c) { let x = 1; if (c) { x = 2; } else { x = 3; } return x; }",
    );
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");

    let phi = returned_value(f);
    assert_eq!(label_of(&graph, phi), "phi");

    let merge = phi_merge(&graph, phi);
    let mut preds = control_in(&graph, merge);
    preds.sort();
    let operands = phi_operands(&graph, phi);
    assert_eq!(
        operands.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
        preds,
        "one operand per merge predecessor"
    );
    let mut values: Vec<String> = operands.iter().map(|(_, v)| label_of(&graph, *v)).collect();
    values.sort();
    assert_eq!(values, vec!["2", "3"]);

    let branch = single(&graph, "branch").id;
    let labels: Vec<EdgeLabel> = control_out(&graph, branch).into_iter().map(|(l, _)| l).collect();
    assert!(labels.contains(&EdgeLabel::True) && labels.contains(&EdgeLabel::False));
    assert_eq!(data_inputs(&graph, branch, EdgeLabel::Condition).len(), 1);
}

#[test]
fn test_if_without_else_merges_initial_value() {
    let graph = extract("function f(c) { let x = 1; if (c) { x = 2; } return x; }");
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");

    let phi = returned_value(f);
    let mut values: Vec<String> = phi_operands(&graph, phi)
        .iter()
        .map(|(_, v)| label_of(&graph, *v))
        .collect();
    values.sort();
    assert_eq!(values, vec!["1", "2"]);
}

#[test]
fn test_unchanged_variable_gets_no_phi() {
    let graph = extract("function f(c) { let x = 1; let y = 5; if (c) { x = 2; } return y; }");
    assert_verified(&graph);
    assert_eq!(GraphStats::collect(&graph).phis, 1);
    let f = graph.find_graph("f").expect("subgraph f");
    assert_eq!(label_of(&graph, returned_value(f)), "5");
}

#[test]
fn test_returning_arm_does_not_reach_merge() {
    let graph = extract("function f(a) { let x = 1; if (a) { x = 2; return x; } return x; }");
    assert_verified(&graph);
    assert!(vertices_of(&graph, "phi").is_empty());
    let merge = single(&graph, "merge").id;
    assert_eq!(control_in(&graph, merge).len(), 1);
}

#[test]
fn test_both_arms_return_closes_the_chain() {
    let graph = extract("function f(c) { if (c) { return 1; } else { return 2; } }");
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");
    assert!(f.vertices.iter().all(|v| v.kind.kind_name() != "merge"));
    assert_eq!(f.vertices.iter().filter(|v| v.kind.kind_name() == "return").count(), 2);
}

#[test]
fn test_unreachable_statement_is_malformed() {
    let err = extract_err("function f(c) { if (c) { return 1; } else { return 2; } let y = 3; }");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    let err = extract_err("return 1; let x = 2;");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(err.to_string().contains("unreachable"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Loops
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_while_loop_header_phi() {
    let graph = extract("let x = 0; while (x < 10) { x = x + 1; } return x;");
    assert_verified(&graph);

    let phi = single(&graph, "phi").id;
    assert_eq!(returned_value(&graph), phi, "loop exit sees the header phi");

    let header = phi_merge(&graph, phi);
    let operands = phi_operands(&graph, phi);
    assert_eq!(operands.len(), 2);
    let mut values: Vec<String> = operands.iter().map(|(_, v)| label_of(&graph, *v)).collect();
    values.sort();
    assert_eq!(values, vec!["+", "0"]);

    let back: Vec<(EdgeLabel, _)> = graph
        .edges
        .iter()
        .filter(|e| e.target == header && e.label == EdgeLabel::LoopBack)
        .map(|e| (e.label, e.source))
        .collect();
    assert_eq!(back.len(), 1);

    // condition reads the phi
    let test = single(&graph, "while").id;
    let cond = data_inputs(&graph, test, EdgeLabel::Condition)[0];
    assert_eq!(data_inputs(&graph, cond, EdgeLabel::Left), vec![phi]);

    let ret = single(&graph, "return").id;
    assert!(control_out(&graph, test).contains(&(EdgeLabel::False, ret)));
}

#[test]
fn test_loop_without_assignments_has_no_phi() {
    let graph = extract("function f(a) { while (a) { g(a); } return a; } function g(v) { return v; }");
    assert_verified(&graph);
    assert!(vertices_of(&graph, "phi").is_empty());
}

#[test]
fn test_break_exits_through_merge() {
    let graph = extract(
        "let i = 0; while (true) { if (i > 5) { break; } i = i + 1; } return i;",
    );
    assert_verified(&graph);

    let jump = single(&graph, "break").id;
    let out = control_out(&graph, jump);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0, EdgeLabel::Break);

    let exit = out[0].1;
    assert_eq!(label_of(&graph, exit), "merge");
    assert_eq!(control_in(&graph, exit).len(), 2, "loop test and break");

    let phi = single(&graph, "phi").id;
    assert_eq!(returned_value(&graph), phi);
}

#[test]
fn test_continue_adds_phi_operands() {
    let graph = extract(
        "let i = 0; let s = 0; \
         while (i < 10) { i = i + 1; if (i == 5) { continue; } s = s + i; } \
         return s;",
    );
    assert_verified(&graph);

    let phis = vertices_of(&graph, "phi");
    assert_eq!(phis.len(), 2);
    let header = phi_merge(&graph, phis[0].id);
    assert_eq!(control_in(&graph, header).len(), 3, "entry, back edge, continue");
    for phi in &phis {
        assert_eq!(phi_operands(&graph, phi.id).len(), 3);
    }

    let jump = single(&graph, "continue").id;
    assert_eq!(control_out(&graph, jump), vec![(EdgeLabel::Continue, header)]);
}

#[test]
fn test_nested_loops_verify() {
    let graph = extract(
        "let i = 0; let n = 0; \
         while (i < 3) { let j = 0; while (j < 3) { n = n + 1; j = j + 1; } i = i + 1; } \
         return n;",
    );
    assert_verified(&graph);
    assert_eq!(vertices_of(&graph, "while").len(), 2);
}

#[test]
fn test_body_local_shadow_gets_no_header_phi() {
    let graph = extract(
        "let x = 0; let i = 0; \
         while (i < 3) { let x = i; x = x + 1; i = i + 1; } \
         return x;",
    );
    assert_verified(&graph);

    let phi = single(&graph, "phi").id;
    for (_, value) in phi_operands(&graph, phi) {
        assert_ne!(value, phi, "no self-referential operand");
    }
    assert_eq!(label_of(&graph, returned_value(&graph)), "0");
}

#[test]
fn test_jump_outside_loop_is_malformed() {
    let err = extract_err("break;");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(err.to_string().contains("outside of a loop"));
}

#[test]
fn test_loop_context_does_not_leak_into_functions() {
    let err = extract_err("while (true) { function f() { break; } }");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

// ═══════════════════════════════════════════════════════════════════════════
// Functions, hoisting and backpatching
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_call_before_declaration_resolves_to_static_symbol() {
    let graph = extract("let r = f(1); function f(a) { return a; } return r;");
    assert_verified(&graph);

    let call = returned_value(&graph);
    assert_eq!(label_of(&graph, call), "call");
    let callee = data_inputs(&graph, call, EdgeLabel::Callee)[0];
    assert_eq!(label_of(&graph, callee), "@f");
    let arg = data_inputs(&graph, call, EdgeLabel::Arg { position: 0 })[0];
    assert_eq!(label_of(&graph, arg), "1");

    let f = graph.find_graph("f").expect("subgraph f");
    let linked: Vec<_> = graph
        .all_edges()
        .into_iter()
        .filter(|e| e.source == callee && e.label == EdgeLabel::Function)
        .map(|e| e.target)
        .collect();
    assert_eq!(linked, vec![f.start]);
    assert_eq!(label_of(&graph, returned_value(f)), "param (0)");
}

#[test]
fn test_forward_reference_is_backpatched() {
    let graph = extract("function g() { return v; } let v = 5; return g();");
    assert_verified(&graph);
    assert!(vertices_of(&graph, "symbol").is_empty(), "placeholder removed");

    let g = graph.find_graph("g").expect("subgraph g");
    assert_eq!(label_of(&graph, returned_value(g)), "5");
}

#[test]
fn test_hoisted_symbol_is_shared_by_calls_before_and_after_declaration() {
    let graph = extract("let a = f(1); function f(p) { return p; } let b = f(2); return a;");
    assert_verified(&graph);

    let callees: Vec<_> = vertices_of(&graph, "call")
        .iter()
        .map(|call| data_inputs(&graph, call.id, EdgeLabel::Callee))
        .collect();
    assert_eq!(callees.len(), 2);
    assert_eq!(callees[0].len(), 1);
    assert_eq!(callees[0], callees[1]);
    assert_eq!(label_of(&graph, callees[0][0]), "@f");
}

#[test]
fn test_function_body_sees_binding_declared_after_it() {
    // function g() { return v; } let v = 5; return g();
    let graph = extract_unit(program(vec![
        function("g", &[], Some(vec![ret(Some(ident("v")))])),
        let_("v", num(5.0)),
        ret(Some(call(ident("g"), vec![]))),
    ]));
    assert_verified(&graph);
    assert!(vertices_of(&graph, "symbol").is_empty(), "no placeholder left");

    let g = graph.find_graph("g").expect("subgraph g");
    let value = returned_value(g);
    assert_eq!(label_of(&graph, value), "5");
    assert_eq!(vertex(&graph, value).kind.kind_name(), "literal");
}

#[test]
fn test_forward_reference_sees_final_binding_of_its_block() {
    // function g() { return v; } let v = 5; v = 6; return g();
    let graph = extract_unit(program(vec![
        function("g", &[], Some(vec![ret(Some(ident("v")))])),
        let_("v", num(5.0)),
        assign("v", num(6.0)),
        ret(Some(call(ident("g"), vec![]))),
    ]));
    assert_verified(&graph);
    assert!(vertices_of(&graph, "symbol").is_empty());

    let g = graph.find_graph("g").expect("subgraph g");
    assert_eq!(label_of(&graph, returned_value(g)), "6");
}

#[test]
fn test_nested_function_forward_reference_is_backpatched() {
    let graph = extract(
        "function outer() { function inner() { return w; } let w = 2; return inner(); } \
         return outer();",
    );
    assert_verified(&graph);
    assert!(vertices_of(&graph, "symbol").is_empty());
    let inner = graph.find_graph("inner").expect("subgraph inner");
    assert_eq!(label_of(&graph, returned_value(inner)), "2");
}

#[test]
fn test_free_identifier_policies() {
    let err = extract_err("return y;");
    assert_eq!(err.kind(), ErrorKind::UndefinedSymbol);
    assert!(err.to_string().contains('y'));

    let graph = extract_lenient("return y;");
    let symbol = single(&graph, "symbol");
    assert_eq!(symbol.label(), "#y");
    assert_eq!(returned_value(&graph), symbol.id);
}

#[test]
fn test_function_without_body_is_malformed() {
    let err = extract_err("function f(a: number): number;");
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_parameters_are_associated_with_start() {
    let graph = extract("function add(a, b) { return a + b; }");
    assert_verified(&graph);
    let add = graph.find_graph("add").expect("subgraph add");
    let params: Vec<_> = graph
        .all_edges()
        .into_iter()
        .filter(|e| e.target == add.start && e.label == EdgeLabel::Parameter)
        .collect();
    assert_eq!(params.len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Objects and classes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_member_store_and_load() {
    let graph = extract("function f(o) { o.x = 1; return o.x; }");
    assert_verified(&graph);

    let store = single(&graph, "store").id;
    let object = data_inputs(&graph, store, EdgeLabel::Object)[0];
    assert_eq!(label_of(&graph, object), "param (0)");
    assert_eq!(label_of(&graph, data_inputs(&graph, store, EdgeLabel::Property)[0]), "x");
    assert_eq!(label_of(&graph, data_inputs(&graph, store, EdgeLabel::Value)[0]), "1");

    let f = graph.find_graph("f").expect("subgraph f");
    let load = returned_value(f);
    assert_eq!(label_of(&graph, load), "load");
    assert_eq!(data_inputs(&graph, load, EdgeLabel::Object), vec![object]);
}

#[test]
fn test_array_literal_allocates_and_stores() {
    let graph = extract("function f() { return [1, 2]; }");
    assert_verified(&graph);
    let f = graph.find_graph("f").expect("subgraph f");

    let alloc = returned_value(f);
    assert_eq!(label_of(&graph, alloc), "new Array");
    let stores = vertices_of(&graph, "store");
    assert_eq!(stores.len(), 2);
    for store in stores {
        assert_eq!(data_inputs(&graph, store.id, EdgeLabel::Object), vec![alloc]);
    }
}

#[test]
fn test_class_constructor_and_method() {
    let graph = extract(
        "class P { constructor(v) { this.v = v; } get2() { return this.v; } } \
         let p = new P(1); return p.get2();",
    );
    assert_verified(&graph);

    let ctor = graph.find_graph("P::constructor").expect("constructor subgraph");
    let method = graph.find_graph("P::get2").expect("method subgraph");
    assert_eq!(label_of(&graph, returned_value(method)), "load");
    assert!(ctor.vertices.iter().any(|v| v.kind.kind_name() == "store"));

    let alloc = single(&graph, "allocation").id;
    assert_eq!(label_of(&graph, alloc), "new P");
    let ctor_call = graph
        .all_edges()
        .into_iter()
        .find(|e| e.source == alloc && e.label == EdgeLabel::Arg { position: 0 })
        .map(|e| e.target)
        .expect("allocation passed as receiver");
    let callee = data_inputs(&graph, ctor_call, EdgeLabel::Callee)[0];
    assert_eq!(label_of(&graph, callee), "@P::constructor");
    let arg = data_inputs(&graph, ctor_call, EdgeLabel::Arg { position: 1 })[0];
    assert_eq!(label_of(&graph, arg), "1");

    let members = graph
        .all_edges()
        .into_iter()
        .filter(|e| e.label == EdgeLabel::Member)
        .count();
    assert_eq!(members, 2);
}

#[test]
fn test_class_members_disabled() {
    let config = ExtractorConfig::default().class_members(false);
    let graph = extract_with("class P { m() { return 1; } } let p = new P(2); return p;", &config);
    assert_verified(&graph);
    assert!(graph.subgraphs.is_empty());

    let alloc = returned_value(&graph);
    let arg = data_inputs(&graph, alloc, EdgeLabel::Arg { position: 0 })[0];
    assert_eq!(label_of(&graph, arg), "2");
}

// ═══════════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_block_markers() {
    let source = "let a = 1; { let b = 2; } return a;";
    let plain = extract(source);
    assert!(vertices_of(&plain, "block_begin").is_empty());

    let config = ExtractorConfig::default().block_markers(true);
    let marked = extract_with(source, &config);
    assert_verified(&marked);
    assert_eq!(vertices_of(&marked, "block_begin").len(), 1);
    assert_eq!(vertices_of(&marked, "block_end").len(), 1);
}

#[test]
fn test_literal_interning() {
    let source = "function f() { return 1 + 1; }";
    let plain = extract(source);
    assert_eq!(vertices_of(&plain, "literal").len(), 2);

    let config = ExtractorConfig::default().intern_literals(true);
    let interned = extract_with(source, &config);
    assert_verified(&interned);
    let literals = vertices_of(&interned, "literal");
    assert_eq!(literals.len(), 1);
    let sum = single(&interned, "binary_op").id;
    assert_eq!(data_inputs(&interned, sum, EdgeLabel::Left), vec![literals[0].id]);
    assert_eq!(data_inputs(&interned, sum, EdgeLabel::Right), vec![literals[0].id]);
}

#[test]
fn test_entry_name_is_configurable() {
    let config = ExtractorConfig::default().entry_name("module");
    let graph = extract_with("return 1;", &config);
    assert_eq!(graph.name, "module");
    assert_eq!(graph.start_vertex().map(|v| v.label()), Some("start (module)".to_string()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Unsupported input
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unknown_operator_is_unsupported() {
    let err = extract_err("let a = 2 ** 3;");
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
}

#[test]
fn test_invalid_assignment_target_is_malformed() {
    let unit = program(vec![expr(codegraph_flowir::features::parsing::domain::Expression::new(
        codegraph_flowir::features::parsing::domain::ExpressionKind::Assignment {
            operator: "=".to_string(),
            target: Box::new(num(1.0)),
            value: Box::new(num(2.0)),
        },
        codegraph_flowir::shared::Span::zero(),
    ))]);
    let err = codegraph_flowir::extract_program(&[unit], &ExtractorConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}
