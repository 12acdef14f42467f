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

use crate::ast::{Ast, Expr, NodeId};
use crate::error::ParseResult;
use crate::lexer::token::TokenKind;
use crate::operators::{OperatorTable, Precedence};
use crate::parser::combinators::Rule;
use crate::parser::context::ParseContext;
use crate::parser::grammar::ExpressionRule;

/// Parses `<operator> <expression>` after an already-parsed `left` operand
/// and returns the root of the correctly associated tree.
///
/// # Behavior
/// The right-hand side is parsed greedily as a whole expression, so the
/// tree is first built right-leaning: `2 * 2 + 2` starts out as
/// `2 * (2 + 2)`. The new node is then rebalanced against its children:
///
/// - A bare binary on the left whose operator binds looser than the new one
///   is rotated so the new operator sinks under it.
/// - A bare binary on the right whose operator binds looser than the new one
///   is rotated so that operator becomes the root:
///   `a * (b + c)` becomes `(a * b) + c`.
///
/// Every node created by a rotation is rebalanced again, which settles
/// chains of any length. Parenthesised binaries never take part.
///
/// # Errors
/// `UnknownOperator` if the symbol is not a declared infix operator.
pub fn resolve_infix(left: NodeId, ctx: &mut ParseContext) -> ParseResult<NodeId> {
    let token = ctx.expect(&TokenKind::Operator)?;
    ctx.operators()
        .infix(&token.value)
        .map_err(|e| e.at(token.span))?;

    let right = ExpressionRule.parse(ctx)?;

    let operator = token.value.clone();
    let node = ctx.alloc(
        token,
        Expr::Binary {
            operator,
            left,
            right,
            parenthesized: false,
        },
    );

    rebalance(&mut ctx.ast, &ctx.operators, node)
}

/// Operator and operands of a binary node that may still rotate.
fn open_binary(ast: &Ast, id: NodeId) -> ParseResult<Option<(String, NodeId, NodeId)>> {
    Ok(match ast.expr(id)? {
        Expr::Binary {
            operator,
            left,
            right,
            parenthesized: false,
        } => Some((operator.clone(), *left, *right)),
        _ => None,
    })
}

fn binary(operator: String, left: NodeId, right: NodeId) -> Expr {
    Expr::Binary {
        operator,
        left,
        right,
        parenthesized: false,
    }
}

/// Rotates `node` until neither operand binds looser than it. Node
/// identities are reused: each operator keeps the node (and token) it was
/// parsed into.
fn rebalance(ast: &mut Ast, operators: &OperatorTable, node: NodeId) -> ParseResult<NodeId> {
    let Some((operator, left, right)) = open_binary(ast, node)? else {
        return Ok(node);
    };

    // (a lo b) op c  =>  a lo (b op c)
    if let Some((left_op, outer_left, inner)) = open_binary(ast, left)? {
        if operators.precedence(&operator, &left_op) == Precedence::Greater {
            log::trace!("rotating `{operator}` under `{left_op}` (left operand)");
            ast.replace(node, binary(operator, inner, right))?;
            let settled = rebalance(ast, operators, node)?;
            ast.replace(left, binary(left_op, outer_left, settled))?;
            return Ok(left);
        }
    }

    // a op (b ro c)  =>  (a op b) ro c
    if let Some((right_op, inner, outer_right)) = open_binary(ast, right)? {
        if operators.precedence(&right_op, &operator) == Precedence::Lesser {
            log::trace!("rotating `{operator}` under `{right_op}` (right operand)");
            ast.replace(node, binary(operator, left, inner))?;
            let settled = rebalance(ast, operators, node)?;
            ast.replace(right, binary(right_op, settled, outer_right))?;
            return Ok(right);
        }
    }

    Ok(node)
}
