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

use std::rc::Rc;

use crate::ast::{NodeId, NodeKind};
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::extensions::{PhaseContext, PhaseExtension};
use crate::operators::{Fixity, Precedence};

pub(crate) fn operator_extensions() -> Vec<Rc<dyn PhaseExtension>> {
    let extensions: [Rc<dyn PhaseExtension>; 3] = [
        Rc::new(DeclareOperator {
            name: "Operator.Infix",
            fixity: Fixity::Infix,
        }),
        Rc::new(DeclareOperator {
            name: "Operator.Prefix",
            fixity: Fixity::Prefix,
        }),
        Rc::new(BindOperators),
    ];
    Vec::from(extensions)
}

/// Raised when an extension is invoked with the wrong number of arguments.
fn arity_mismatch(ctx: &PhaseContext<'_>, extension: &dyn PhaseExtension, found: &[NodeId]) -> TalonError {
    let list = |kinds: Vec<String>| kinds.join(", ");
    let expected = extension.parameters().iter().map(|k| k.to_string()).collect();
    let found = found
        .iter()
        .map(|id| ctx.ast().kind(*id).map_or_else(|_| "?".to_string(), |k| k.to_string()))
        .collect();

    TalonError::new(ErrorKind::ExtensionParameterMismatch {
        name: extension.name().to_string(),
        expected: list(expected),
        found: list(found),
    })
    .at(ctx.span())
}

/// `@Operator.Infix((Int) ^ (o Int) (Int))` declares the signature's name as
/// a new operator. Expressions after the annotation may use it.
struct DeclareOperator {
    name: &'static str,
    fixity: Fixity,
}

impl PhaseExtension for DeclareOperator {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> &[NodeKind] {
        &[NodeKind::Signature]
    }

    fn invoke(&self, ctx: &mut PhaseContext<'_>, parameters: &[NodeId]) -> ParseResult<()> {
        let &[signature] = parameters else {
            return Err(arity_mismatch(ctx, self, parameters));
        };
        let symbol = ctx.signature_name(signature)?;
        ctx.declare_operator(&symbol, self.fixity)
    }
}

/// `@Operator.Binds(tighter, looser)` relates two infix operators.
struct BindOperators;

impl PhaseExtension for BindOperators {
    fn name(&self) -> &str {
        "Operator.Binds"
    }

    fn parameters(&self) -> &[NodeKind] {
        &[NodeKind::Signature, NodeKind::Signature]
    }

    fn invoke(&self, ctx: &mut PhaseContext<'_>, parameters: &[NodeId]) -> ParseResult<()> {
        let &[tighter, looser] = parameters else {
            return Err(arity_mismatch(ctx, self, parameters));
        };
        let tighter = ctx.signature_name(tighter)?;
        let looser = ctx.signature_name(looser)?;
        ctx.relate_operators(&tighter, &looser, Precedence::Greater)
    }
}
