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

//! Annotations and phase extensions: dispatch, parameter checking, effects
//! on the operator table and rewrites of the tree.

use std::cell::RefCell;
use std::rc::Rc;

use talon::{
    parse, tokenize, Ast, ErrorKind, Expr, ExtensionRegistry, Fixity, FnExtension, NodeId, NodeKind, ParseContext,
    Phase, PhaseAnnotation, Span,
};

fn parse_with(source: &str, extensions: ExtensionRegistry) -> talon::ParseResult<(Ast, NodeId)> {
    let mut ctx = ParseContext::new(tokenize(source)?).with_extensions(extensions);
    let root = ctx.parse_program()?;
    Ok((ctx.into_ast(), root))
}

fn find(ast: &Ast, kind: NodeKind) -> NodeId {
    ast.iter()
        .find(|node| node.kind() == kind)
        .map(|node| node.id)
        .unwrap_or_else(|| panic!("no {kind} node"))
}

const POWER: &str = r#"
@Operator.Infix((Int) ^ (o Int) (Int))
@Operator.Binds((Int) ^ (o Int) (Int), (Int) * (o Int) (Int))

api Math {
    (Int) cube (x Int) (Int) {
        return x ^ 2 * x
    }
}
"#;

#[test]
fn declared_operator_is_usable_after_the_annotation() {
    let program = parse(POWER).unwrap();
    let ast = &program.ast;

    assert!(program.operators.contains("^", Fixity::Infix));

    let Expr::Return { value } = ast[find(ast, NodeKind::Return)].expr else {
        unreachable!()
    };
    let Expr::Binary { operator, left, .. } = &ast[value].expr else {
        panic!("return value is not a binary");
    };
    assert_eq!(operator, "*");
    assert!(matches!(&ast[*left].expr, Expr::Binary { operator, .. } if operator == "^"));
}

#[test]
fn program_annotations_are_recorded_and_attached_once() {
    let source = "@Operator.Infix((Int) ^ (o Int) (Int)) @Operator.Infix((Int) <> (o Int) (Int)) api A { }";
    let program = parse(source).unwrap();
    let ast = &program.ast;

    let Expr::Program { apis, annotations } = &ast[program.root].expr else {
        panic!("root is not a program");
    };
    assert_eq!(apis.len(), 1);
    assert_eq!(annotations.len(), 2);

    let attached = &ast[program.root].annotations;
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].name, "Operator.Infix");
    assert_eq!(attached[0].origin, Some(annotations[0]));
}

#[test]
fn annotation_node_keeps_name_and_parameters() {
    let program = parse(POWER).unwrap();
    let ast = &program.ast;

    let Expr::Program { annotations, .. } = &ast[program.root].expr else {
        panic!("root is not a program");
    };
    let Expr::Annotation { name, parameters } = &ast[annotations[1]].expr else {
        panic!("not an annotation");
    };
    assert_eq!(name, "Operator.Binds");
    assert_eq!(parameters.len(), 2);
    assert_eq!(ast.kind(parameters[0]).unwrap(), NodeKind::Signature);
}

#[test]
fn prefix_operators_can_be_declared() {
    let source = "@Operator.Prefix((Int) ~ () (Int)) api A { (Int) f (x Int) (Int) { return ~x } }";
    let program = parse(source).unwrap();

    let unary = find(&program.ast, NodeKind::Unary);
    assert!(matches!(&program.ast[unary].expr, Expr::Unary { operator, .. } if operator == "~"));
}

#[test]
fn extensions_see_the_phase_they_run_in() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut extensions = ExtensionRegistry::with_builtins();
    extensions
        .register(FnExtension::new("Trace", Vec::new(), move |ctx, _| {
            sink.borrow_mut().push(ctx.phase());
            Ok(())
        }))
        .unwrap();

    parse_with("@Trace api A { @Trace (A) f () { @Trace x = 1 } }", extensions).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![Phase::Program, Phase::Declaration, Phase::Statement]
    );
}

#[test]
fn extensions_rewrite_the_tree() {
    let mut extensions = ExtensionRegistry::new();
    extensions
        .register(FnExtension::new("Rename", vec![NodeKind::Method], |ctx, params| {
            let method = params[0];
            let Expr::Method { signature, .. } = ctx.ast().expr(method)?.clone() else {
                return Ok(());
            };
            let Expr::Signature { name, .. } = ctx.ast().expr(signature)?.clone() else {
                return Ok(());
            };

            let token = ctx.ast().node(name)?.token.clone();
            let renamed = ctx.alloc(token, Expr::Identifier { value: "renamed".into() });
            ctx.replace_child(signature, name, renamed)?;

            let site = ctx.site();
            ctx.annotate(method, PhaseAnnotation::from_node("Rename", site))?;
            Ok(())
        }))
        .unwrap();

    let (ast, _) = parse_with("api A { @Rename((A) f () { }) }", extensions).unwrap();

    let method = find(&ast, NodeKind::Method);
    let Expr::Method { signature, .. } = ast[method].expr else {
        unreachable!()
    };
    let Expr::Signature { name, .. } = ast[signature].expr else {
        unreachable!()
    };
    assert_eq!(ast[name].expr, Expr::Identifier { value: "renamed".into() });

    let annotation = ast[method].annotation("Rename").unwrap();
    assert_eq!(annotation.origin, Some(find(&ast, NodeKind::Annotation)));
}

#[test]
fn marker_annotation_leaves_the_following_method_alone() {
    let mut extensions = ExtensionRegistry::new();
    extensions
        .register(FnExtension::new("Marker", Vec::new(), |_, _| Ok(())))
        .unwrap();

    let (ast, root) = parse_with("api A { @Marker (A) f () { } }", extensions).unwrap();

    let Expr::Program { apis, .. } = &ast[root].expr else {
        unreachable!()
    };
    let Expr::Api { body, .. } = &ast[apis[0]].expr else {
        unreachable!()
    };
    let kinds: Vec<NodeKind> = body.iter().map(|n| ast.kind(*n).unwrap()).collect();
    assert_eq!(kinds, vec![NodeKind::Annotation, NodeKind::Method]);
}

#[test]
fn unknown_extension_is_reported_at_the_annotation() {
    let error = parse("api A {\n  @Nope\n}").unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownExtension { name: "Nope".into() });
    assert_eq!(error.span, Some(Span::new(1, 2, 10)));
}

#[test]
fn parameter_kinds_must_match() {
    let error = parse("@Operator.Infix(1) api A { }").unwrap_err();
    assert_eq!(
        error.kind,
        ErrorKind::ExtensionParameterMismatch {
            name: "Operator.Infix".into(),
            expected: "Signature".into(),
            found: "IntLiteral".into(),
        }
    );
}

#[test]
fn redeclaring_a_builtin_operator_fails() {
    let error = parse("@Operator.Infix((Int) + (o Int) (Int)) api A { }").unwrap_err();
    assert_eq!(error.kind, ErrorKind::AlreadyDeclaredOperator { symbol: "+".into() });
    assert_eq!(error.span, Some(Span::new(0, 0, 0)));
}

#[test]
fn rebinding_related_operators_fails() {
    let error = parse("@Operator.Binds((Int) + (o Int) (Int), (Int) * (o Int) (Int)) api A { }").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::AlreadyRelated { .. }));
}

#[test]
fn registry_rejects_duplicate_names() {
    let mut registry = ExtensionRegistry::with_builtins();
    assert_eq!(registry.len(), 3);
    assert!(registry.contains("Operator.Binds"));

    let error = registry
        .register(FnExtension::new("Operator.Infix", Vec::new(), |_, _| Ok(())))
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::DuplicateExtension { name: "Operator.Infix".into() });
}
