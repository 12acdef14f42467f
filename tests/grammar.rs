/*
 * ==========================================================================
 * TALON - Sharp parsing for the Talon API language
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 *
 * License:
 * This file is part of the TALON compiler front end.
 *
 * TALON is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! Grammar productions, exercised through the public entry points.

use rstest::rstest;
use talon::{
    parse, parse_expression, parse_type, tokenize, Ast, ErrorKind, Expr, NodeId, NodeKind, ParseContext,
    ParserConfig,
};

fn name(ast: &Ast, id: NodeId) -> &str {
    match &ast[id].expr {
        Expr::Identifier { value } | Expr::TypeIdentifier { value, .. } => value,
        other => panic!("not a name: {other:?}"),
    }
}

fn api_parts(ast: &Ast, root: NodeId) -> (Option<NodeId>, Option<NodeId>, Vec<NodeId>) {
    let Expr::Program { apis, .. } = &ast[root].expr else {
        panic!("root is not a program");
    };
    let Expr::Api { within, with, body, .. } = &ast[apis[0]].expr else {
        panic!("not an api");
    };
    (*within, *with, body.clone())
}

// ===== Types =====

#[rstest]
#[case::plain("Int", 0)]
#[case::list("[Int]", 1)]
#[case::deep("[[[TypeA]]]", 3)]
#[case::five_deep("[[[[[TypeA]]]]]", 5)]
fn list_types_nest_to_any_depth(#[case] source: &str, #[case] depth: usize) {
    let (ast, root) = parse_type(source).unwrap();

    let mut node = root;
    let mut seen = 0;
    while let Expr::ListType { element } = &ast[node].expr {
        node = *element;
        seen += 1;
    }

    assert_eq!(seen, depth);
    assert_eq!(ast.kind(node).unwrap(), NodeKind::TypeIdentifier);
}

#[rstest]
#[case("[[[TypeA]]")]
#[case("[Int")]
fn unbalanced_list_type_runs_out_of_tokens(#[case] source: &str) {
    assert_eq!(parse_type(source).unwrap_err().kind, ErrorKind::OutOfTokens);
}

#[test]
fn qualified_types_are_mangled() {
    let (ast, root) = parse_type("Geo::Point").unwrap();
    assert_eq!(
        ast[root].expr,
        Expr::TypeIdentifier {
            value: "Geo__Point".into(),
            fully_qualified: true
        }
    );
}

#[test]
fn mangling_can_be_disabled() {
    let config = ParserConfig {
        mangle_qualified_names: false,
        ..ParserConfig::default()
    };
    let mut ctx = ParseContext::new(tokenize("Geo::Point").unwrap()).with_config(config);
    let root = ctx.parse_type().unwrap();

    assert_eq!(name(ctx.ast(), root), "Geo::Point");
}

#[test]
fn mangler_is_injectable() {
    let mut ctx = ParseContext::new(tokenize("[Geo::Point]").unwrap())
        .with_mangler(|qualified: &str| qualified.to_lowercase().replace("::", "."));
    let root = ctx.parse_type().unwrap();

    let Expr::ListType { element } = ctx.ast()[root].expr else {
        panic!("not a list type");
    };
    assert_eq!(name(ctx.ast(), element), "geo.point");
}

// ===== Expressions =====

#[test]
fn instance_calls_chain_left_to_right() {
    let (ast, root) = parse_expression("a.b().c(1)").unwrap();

    let Expr::InstanceCall { receiver, method, args } = &ast[root].expr else {
        panic!("outermost node is not a call");
    };
    assert_eq!(name(&ast, *method), "c");
    assert_eq!(args.len(), 1);

    let Expr::InstanceCall { receiver: inner, method, args } = &ast[*receiver].expr else {
        panic!("receiver is not a call");
    };
    assert_eq!(name(&ast, *method), "b");
    assert!(args.is_empty());
    assert_eq!(name(&ast, *inner), "a");
}

#[test]
fn long_call_chain_nests_on_the_receiver() {
    let (ast, root) = parse_expression("a.b(1).c().d(2,3)").unwrap();

    let mut links = Vec::new();
    let mut node = root;
    while let Expr::InstanceCall { receiver, method, args } = &ast[node].expr {
        links.push((name(&ast, *method).to_string(), args.len()));
        node = *receiver;
    }

    assert_eq!(
        links,
        vec![("d".to_string(), 2), ("c".to_string(), 0), ("b".to_string(), 1)]
    );
    assert_eq!(name(&ast, node), "a");
}

#[test]
fn static_call_result_can_be_a_receiver() {
    let (ast, root) = parse_expression("Math.max(1, 2).abs()").unwrap();

    let Expr::InstanceCall { receiver, method, .. } = &ast[root].expr else {
        panic!("outermost node is not an instance call");
    };
    assert_eq!(name(&ast, *method), "abs");

    let Expr::StaticCall { receiver, method, args } = &ast[*receiver].expr else {
        panic!("receiver is not a static call");
    };
    assert_eq!(name(&ast, *receiver), "Math");
    assert_eq!(name(&ast, *method), "max");
    assert_eq!(args.len(), 2);
}

#[test]
fn constructor_call_arguments_keep_their_kinds() {
    let (ast, root) = parse_expression("Point(1, 2.5, x)").unwrap();

    let Expr::ConstructorCall { receiver, args } = &ast[root].expr else {
        panic!("not a constructor call");
    };
    assert_eq!(name(&ast, *receiver), "Point");

    let kinds: Vec<NodeKind> = args.iter().map(|a| ast.kind(*a).unwrap()).collect();
    assert_eq!(kinds, vec![NodeKind::IntLiteral, NodeKind::RealLiteral, NodeKind::Identifier]);
}

#[rstest]
#[case::empty("[]", 0)]
#[case::flat("[1, 2, 3]", 3)]
#[case::nested("[1, x, [2]]", 3)]
fn list_literals(#[case] source: &str, #[case] len: usize) {
    let (ast, root) = parse_expression(source).unwrap();
    let Expr::ListLiteral { elements } = &ast[root].expr else {
        panic!("not a list literal");
    };
    assert_eq!(elements.len(), len);
}

#[test]
fn prefix_operators_apply_to_the_next_operand() {
    let (ast, root) = parse_expression("-x").unwrap();
    let Expr::Unary { operator, operand } = &ast[root].expr else {
        panic!("not a unary");
    };
    assert_eq!(operator, "-");
    assert_eq!(name(&ast, *operand), "x");
}

#[test]
fn undeclared_prefix_operator_is_rejected() {
    let error = parse_expression("~x").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnknownOperator { .. }));
}

#[test]
fn trailing_input_after_an_expression_is_rejected() {
    let error = parse_expression("1 2").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnexpectedToken { .. }));
}

#[test]
fn integer_overflow_is_an_invalid_literal() {
    let error = parse_expression("99999999999999999999").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidLiteral { .. }));
}

// ===== Declarations =====

const SHAPES: &str = r#"
api Shapes within Base with Printable with Eq {
    type Point (x Int, y Int) with Display

    (self Point) scale (factor Int) (Point) {
        scaled Point = Point(x, y)
        defer {
            log.flush()
        }
        return scaled
    }

    (Point) origin () (Point) {
        return Point(0, 0)
    }
}
"#;

#[test]
fn full_api_declaration() {
    let program = parse(SHAPES).unwrap();
    let ast = &program.ast;
    let (within, with, body) = api_parts(ast, program.root);

    let Expr::Within { api } = ast[within.unwrap()].expr else {
        panic!("not a within clause");
    };
    assert_eq!(name(ast, api), "Base");

    let Expr::With { apis } = &ast[with.unwrap()].expr else {
        panic!("not a with clause");
    };
    let withs: Vec<&str> = apis.iter().map(|a| name(ast, *a)).collect();
    assert_eq!(withs, vec!["Printable", "Eq"]);

    let kinds: Vec<NodeKind> = body.iter().map(|n| ast.kind(*n).unwrap()).collect();
    assert_eq!(kinds, vec![NodeKind::TypeDef, NodeKind::Method, NodeKind::Method]);
}

#[test]
fn type_declaration_synthesizes_a_constructor() {
    let program = parse(SHAPES).unwrap();
    let ast = &program.ast;
    let (_, _, body) = api_parts(ast, program.root);

    let Expr::TypeDef {
        name: type_name,
        properties,
        property_order,
        constructor,
        traits,
    } = &ast[body[0]].expr
    else {
        panic!("not a type declaration");
    };

    assert_eq!(name(ast, *type_name), "Point");
    assert_eq!(property_order.get("x"), Some(&0));
    assert_eq!(property_order.get("y"), Some(&1));
    assert_eq!(traits.iter().map(|t| name(ast, *t)).collect::<Vec<_>>(), vec!["Display"]);

    let Expr::Signature {
        name: init,
        receiver,
        params,
        return_type,
        is_static,
    } = &ast[constructor.unwrap()].expr
    else {
        panic!("constructor is not a signature");
    };
    assert_eq!(name(ast, *init), "__init__");
    assert_eq!(name(ast, *receiver), "Point");
    assert_eq!(params.len(), properties.len());
    for (param, property) in params.iter().zip(properties) {
        assert_ne!(param, property);
        assert_eq!(ast[*param].expr.kind(), NodeKind::Pair);
        let (Expr::Pair { name: copy, .. }, Expr::Pair { name: original, .. }) =
            (&ast[*param].expr, &ast[*property].expr)
        else {
            panic!("constructor parameter is not a pair");
        };
        assert_eq!(name(ast, *copy), name(ast, *original));
    }
    assert_eq!(name(ast, return_type.unwrap()), "Point");
    assert!(*is_static);
}

#[test]
fn parsed_programs_form_a_tree() {
    let program = parse(SHAPES).unwrap();
    let ast = &program.ast;

    for node in ast.iter() {
        let parent = ast.find_parent(node.id).unwrap();
        if node.id == program.root {
            assert_eq!(parent, None);
        }
    }
}

#[test]
fn rewriting_a_property_leaves_the_constructor_alone() {
    let mut program = parse("api A { type Point (x Int, y Int) }").unwrap();
    let (_, _, body) = api_parts(&program.ast, program.root);
    let typedef = body[0];

    let Expr::TypeDef { properties, constructor, .. } = program.ast[typedef].expr.clone() else {
        panic!("not a type declaration");
    };
    assert_eq!(program.ast.find_parent(properties[0]).unwrap(), Some(typedef));

    let token = program.ast[properties[0]].token.clone();
    let stand_in = program.ast.alloc(token, Expr::Identifier { value: "z".into() });
    program.ast.replace_child(typedef, properties[0], stand_in).unwrap();

    let Expr::Signature { params, .. } = &program.ast[constructor.unwrap()].expr else {
        panic!("constructor is not a signature");
    };
    assert_ne!(params[0], stand_in);
    assert_eq!(program.ast.find_parent(properties[0]).unwrap(), None);
    assert_eq!(program.ast.find_parent(params[0]).unwrap(), constructor);
}

#[test]
fn instance_signature_receiver_is_its_own_node() {
    let program = parse(SHAPES).unwrap();
    let ast = &program.ast;
    let (_, _, body) = api_parts(ast, program.root);

    let Expr::Method { signature, .. } = ast[body[1]].expr else {
        panic!("not a method");
    };
    let Expr::Signature { receiver, params, .. } = &ast[signature].expr else {
        panic!("not a signature");
    };
    let Expr::Pair { ty, .. } = ast[params[0]].expr else {
        panic!("receiver parameter is not a pair");
    };

    assert_ne!(*receiver, ty);
    assert_eq!(ast[*receiver].expr, ast[ty].expr);
    assert_eq!(ast.find_parent(*receiver).unwrap(), Some(signature));
    assert_eq!(ast.find_parent(ty).unwrap(), Some(params[0]));
}

#[test]
fn instance_and_static_signatures() {
    let program = parse(SHAPES).unwrap();
    let ast = &program.ast;
    let (_, _, body) = api_parts(ast, program.root);

    let Expr::Method { signature, body: block } = ast[body[1]].expr else {
        panic!("not a method");
    };
    let Expr::Signature {
        name: method,
        receiver,
        params,
        is_static,
        ..
    } = &ast[signature].expr
    else {
        panic!("not a signature");
    };
    assert_eq!(name(ast, *method), "scale");
    assert_eq!(name(ast, *receiver), "Point");
    assert_eq!(params.len(), 2);
    assert!(!*is_static);

    let Expr::Block { body: statements, ret } = &ast[block].expr else {
        panic!("not a block");
    };
    let kinds: Vec<NodeKind> = statements.iter().map(|s| ast.kind(*s).unwrap()).collect();
    assert_eq!(kinds, vec![NodeKind::Assignment, NodeKind::Defer]);
    assert!(ret.is_some());

    let Expr::Method { signature, .. } = ast[body[2]].expr else {
        panic!("not a method");
    };
    let Expr::Signature { params, is_static, .. } = &ast[signature].expr else {
        panic!("not a signature");
    };
    assert!(params.is_empty());
    assert!(*is_static);
}

#[test]
fn signature_return_clause_is_optional() {
    let program = parse("api A { (A) f () () { } (A) g () { } }").unwrap();
    let ast = &program.ast;
    let (_, _, body) = api_parts(ast, program.root);

    for method in body {
        let Expr::Method { signature, .. } = ast[method].expr else {
            panic!("not a method");
        };
        let Expr::Signature { return_type, .. } = &ast[signature].expr else {
            panic!("not a signature");
        };
        assert!(return_type.is_none());
    }
}

#[test]
fn property_less_type_leaves_the_next_method_alone() {
    let source = "api A { type Marker (self A) touch () { } type Tag (A) make () (A) { } }";
    let program = parse(source).unwrap();
    let ast = &program.ast;
    let (_, _, body) = api_parts(ast, program.root);

    let kinds: Vec<NodeKind> = body.iter().map(|n| ast.kind(*n).unwrap()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::TypeDef, NodeKind::Method, NodeKind::TypeDef, NodeKind::Method]
    );

    let Expr::TypeDef { properties, constructor, .. } = &ast[body[0]].expr else {
        panic!("not a type declaration");
    };
    assert!(properties.is_empty());
    assert!(constructor.is_none());
}

#[rstest]
#[case::bare("api A { }", false, 0)]
#[case::within("api A within B { }", true, 0)]
#[case::with("api A with B { }", false, 1)]
#[case::both("api A within B with C with D { }", true, 2)]
fn within_and_with_are_optional(#[case] source: &str, #[case] has_within: bool, #[case] withs: usize) {
    let program = parse(source).unwrap();
    let (within, with, _) = api_parts(&program.ast, program.root);

    assert_eq!(within.is_some(), has_within);
    match with {
        Some(with) => {
            let Expr::With { apis } = &program.ast[with].expr else {
                panic!("not a with clause");
            };
            assert_eq!(apis.len(), withs);
        }
        None => assert_eq!(withs, 0),
    }
}

#[rstest]
#[case("api Foo")]
#[case("api Foo within")]
#[case("api Foo within Base")]
#[case("api Foo with")]
fn truncated_api_headers_fail(#[case] source: &str) {
    assert!(parse(source).is_err());
}

// ===== Statements and blocks =====

#[test]
fn assignments_with_and_without_types() {
    let program = parse("api A { (A) f () { x = 1 xs [Int] = [1, 2] p Point = Point(1, 2) } }").unwrap();
    let ast = &program.ast;

    let tys: Vec<bool> = ast
        .iter()
        .filter_map(|node| match &node.expr {
            Expr::Assignment { ty, .. } => Some(ty.is_some()),
            _ => None,
        })
        .collect();
    assert_eq!(tys, vec![false, true, true]);
}

#[test]
fn code_after_return_is_rejected() {
    let error = parse("api A { (A) f () { return 1 x = 2 } }").unwrap_err();
    assert_eq!(error.kind, ErrorKind::CodeAfterReturn);
    assert_eq!(error.span.map(|s| s.column), Some(28));
}

#[test]
fn defer_block_cannot_return() {
    let error = parse("api A { (A) f () { defer { return 1 } } }").unwrap_err();
    assert_eq!(error.kind, ErrorKind::DeferReturn);
}

#[test]
fn unclosed_block_reports_the_opening_brace() {
    let error = parse("api A {\n  (A) f () {\n    x = 1\n").unwrap_err();

    let ErrorKind::UnclosedBlock { opened } = error.kind else {
        panic!("expected an unclosed block, got {:?}", error.kind);
    };
    assert_eq!((opened.line, opened.column), (1, 11));
}

#[test]
fn unclosed_api_reports_the_opening_brace() {
    let error = parse("api A {").unwrap_err();
    let ErrorKind::UnclosedBlock { opened } = error.kind else {
        panic!("expected an unclosed block, got {:?}", error.kind);
    };
    assert_eq!((opened.line, opened.column), (0, 6));
}

// ===== Program driver =====

#[test]
fn empty_source_is_an_empty_program() {
    let program = parse("").unwrap();
    assert_eq!(
        program.ast[program.root].expr,
        Expr::Program {
            apis: Vec::new(),
            annotations: Vec::new()
        }
    );
}

#[test]
fn stray_top_level_token_is_unexpected() {
    let error = parse("junk api A { }").unwrap_err();
    let ErrorKind::UnexpectedToken { found, .. } = error.kind else {
        panic!("expected an unexpected token");
    };
    assert_eq!(found, "junk");
}

#[test]
fn permissive_mode_skips_undispatchable_tokens() {
    let mut ctx = ParseContext::new(tokenize("junk api A { } } api B { }").unwrap()).with_config(ParserConfig::permissive());
    let root = ctx.parse_program().unwrap();

    let Expr::Program { apis, .. } = &ctx.ast()[root].expr else {
        panic!("not a program");
    };
    assert_eq!(apis.len(), 2);
}
