//! Static evaluation of `tailwind.config.{js,ts}` modules.
//!
//! The module is parsed with Oxc and its exported object literal is folded into
//! a JSON value. Nothing is executed: `require("x")` and imported bindings
//! evaluate to their module specifier, which is exactly what a plugin reference
//! needs.
//!
//! ```text
//! module.exports = { plugins: [require('daisyui')] }  →  { "plugins": ["daisyui"] }
//! ```

use std::collections::HashMap;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrayExpressionElement, AssignmentTarget, BindingPatternKind, CallExpression, Expression,
    ImportDeclarationSpecifier, ObjectPropertyKind, Program, PropertyKey, Statement,
    UnaryOperator, VariableDeclaration,
};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::{GetSpan, SourceType, Span};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::format::SourceFormat;

/// Bindings may refer to other bindings; this bounds the chain (and breaks cycles).
const MAX_BINDING_DEPTH: usize = 32;

/// Evaluate the exported config object of a JS/TS module.
pub(crate) fn evaluate(source: &str, format: SourceFormat) -> Result<Value, ParseError> {
    let source_type = match format {
        SourceFormat::TypeScript => SourceType::ts(),
        _ => SourceType::mjs(),
    };

    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, source_type).parse();

    if let Some(error) = errors.first() {
        return Err(ParseError::syntax(format, error.to_string()));
    }
    if panicked {
        return Err(ParseError::syntax(format, "parser aborted"));
    }

    let evaluator = Evaluator::collect(source, &program);
    let exported = find_export(&program).ok_or(ParseError::MissingExport)?;
    evaluator.evaluate(exported, 0)
}

/// The expression assigned to `module.exports` / `export default` / `export =`.
///
/// When a module assigns more than once, the last assignment wins.
fn find_export<'b, 'a>(program: &'b Program<'a>) -> Option<&'b Expression<'a>> {
    let mut exported = None;
    for statement in &program.body {
        match statement {
            Statement::ExpressionStatement(stmt) => {
                if let Expression::AssignmentExpression(assign) = &stmt.expression {
                    if is_module_exports(&assign.left) {
                        exported = Some(&assign.right);
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                if let Some(expr) = export.declaration.as_expression() {
                    exported = Some(expr);
                }
            }
            Statement::TSExportAssignment(export) => {
                exported = Some(&export.expression);
            }
            _ => {}
        }
    }
    exported
}

fn is_module_exports(target: &AssignmentTarget) -> bool {
    match target {
        AssignmentTarget::StaticMemberExpression(member) => {
            member.property.name.as_str() == "exports"
                && matches!(&member.object, Expression::Identifier(id) if id.name.as_str() == "module")
        }
        _ => false,
    }
}

/// `require("x")` → `"x"`
fn require_call_specifier(call: &CallExpression) -> Option<String> {
    let Expression::Identifier(callee) = &call.callee else {
        return None;
    };
    if callee.name.as_str() != "require" || call.arguments.len() != 1 {
        return None;
    }
    match call.arguments[0].as_expression()? {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// `require("x")` or `require("x").default` → `"x"`
fn require_specifier(expr: &Expression) -> Option<String> {
    match expr {
        Expression::CallExpression(call) => require_call_specifier(call),
        Expression::StaticMemberExpression(member) if member.property.name.as_str() == "default" => {
            match &member.object {
                Expression::CallExpression(call) => require_call_specifier(call),
                _ => None,
            }
        }
        Expression::ParenthesizedExpression(paren) => require_specifier(&paren.expression),
        _ => None,
    }
}

struct Evaluator<'b, 'a> {
    source: &'b str,
    /// Top-level `const name = <expr>` bindings
    bindings: HashMap<String, &'b Expression<'a>>,
    /// Identifiers bound to an imported or required module
    modules: HashMap<String, String>,
}

impl<'b, 'a> Evaluator<'b, 'a> {
    fn collect(source: &'b str, program: &'b Program<'a>) -> Self {
        let mut evaluator = Self {
            source,
            bindings: HashMap::new(),
            modules: HashMap::new(),
        };

        for statement in &program.body {
            match statement {
                Statement::ImportDeclaration(import) => {
                    let Some(specifiers) = &import.specifiers else {
                        continue;
                    };
                    for specifier in specifiers {
                        let local = match specifier {
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                            ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                        };
                        evaluator
                            .modules
                            .insert(local.name.to_string(), import.source.value.to_string());
                    }
                }
                Statement::VariableDeclaration(var) => evaluator.collect_declarations(var),
                Statement::ExportNamedDeclaration(export) => {
                    if let Some(oxc_ast::ast::Declaration::VariableDeclaration(var)) =
                        &export.declaration
                    {
                        evaluator.collect_declarations(var);
                    }
                }
                _ => {}
            }
        }

        debug!(
            bindings = evaluator.bindings.len(),
            modules = evaluator.modules.len(),
            "collected top-level bindings"
        );
        evaluator
    }

    fn collect_declarations(&mut self, var: &'b VariableDeclaration<'a>) {
        for declarator in &var.declarations {
            let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
                continue;
            };
            let Some(init) = &declarator.init else {
                continue;
            };
            let name = ident.name.to_string();
            match require_specifier(init) {
                Some(specifier) => {
                    self.modules.insert(name, specifier);
                }
                None => {
                    self.bindings.insert(name, init);
                }
            }
        }
    }

    fn evaluate(&self, expr: &Expression<'a>, depth: usize) -> Result<Value, ParseError> {
        match expr {
            Expression::ObjectExpression(object) => {
                let mut map = Map::with_capacity(object.properties.len());
                for property in &object.properties {
                    match property {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            if prop.computed {
                                return Err(self.unsupported("computed property key", prop.span));
                            }
                            if prop.method {
                                return Err(self.unsupported("method", prop.span));
                            }
                            let key = self.property_key(&prop.key)?;
                            map.insert(key, self.evaluate(&prop.value, depth)?);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            return Err(self.unsupported("object spread", spread.span));
                        }
                    }
                }
                Ok(Value::Object(map))
            }
            Expression::ArrayExpression(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            return Err(self.unsupported("array spread", spread.span));
                        }
                        ArrayExpressionElement::Elision(_) => items.push(Value::Null),
                        other => {
                            let Some(item) = other.as_expression() else {
                                return Err(self.unsupported("array element", other.span()));
                            };
                            items.push(self.evaluate(item, depth)?);
                        }
                    }
                }
                Ok(Value::Array(items))
            }
            Expression::StringLiteral(lit) => Ok(Value::String(lit.value.to_string())),
            Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
                let mut text = String::new();
                for quasi in &template.quasis {
                    match quasi.value.cooked.as_ref() {
                        Some(cooked) => text.push_str(cooked.as_str()),
                        None => return Err(self.unsupported("invalid escape in template", quasi.span)),
                    }
                }
                Ok(Value::String(text))
            }
            Expression::NumericLiteral(lit) => self.number(lit.value, lit.span),
            Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
                match &unary.argument {
                    Expression::NumericLiteral(lit) => self.number(-lit.value, unary.span),
                    _ => Err(self.unsupported("unary expression", unary.span)),
                }
            }
            Expression::BooleanLiteral(lit) => Ok(Value::Bool(lit.value)),
            Expression::NullLiteral(_) => Ok(Value::Null),
            Expression::RegExpLiteral(lit) => self.regex_source(lit.span),
            Expression::CallExpression(call) => self.evaluate_call(call),
            Expression::StaticMemberExpression(_) => match require_specifier(expr) {
                Some(specifier) => Ok(Value::String(specifier)),
                None => Err(self.unsupported("member expression", expr.span())),
            },
            Expression::Identifier(ident) => {
                let name = ident.name.as_str();
                if let Some(specifier) = self.modules.get(name) {
                    return Ok(Value::String(specifier.clone()));
                }
                if let Some(init) = self.bindings.get(name) {
                    if depth >= MAX_BINDING_DEPTH {
                        return Err(self.unsupported("deeply nested binding", ident.span));
                    }
                    return self.evaluate(init, depth + 1);
                }
                if name == "undefined" {
                    return Ok(Value::Null);
                }
                Err(self.unsupported(&format!("unbound identifier `{name}`"), ident.span))
            }
            Expression::ParenthesizedExpression(paren) => self.evaluate(&paren.expression, depth),
            Expression::TSSatisfiesExpression(satisfies) => {
                self.evaluate(&satisfies.expression, depth)
            }
            Expression::TSAsExpression(as_expr) => self.evaluate(&as_expr.expression, depth),
            other => Err(self.unsupported(describe(other), other.span())),
        }
    }

    /// Plugins are often written as `require("x")(options)` or `forms({ ... })`.
    /// Both reduce to the module specifier; the options are dropped.
    fn evaluate_call(&self, call: &CallExpression<'a>) -> Result<Value, ParseError> {
        if let Some(specifier) = require_call_specifier(call) {
            return Ok(Value::String(specifier));
        }

        let invoked = match &call.callee {
            Expression::Identifier(ident) => self.modules.get(ident.name.as_str()).cloned(),
            callee => require_specifier(callee),
        };
        match invoked {
            Some(specifier) => {
                warn!(plugin = %specifier, "plugin options are not evaluated statically, dropping them");
                Ok(Value::String(specifier))
            }
            None => Err(self.unsupported("function call", call.span)),
        }
    }

    fn property_key(&self, key: &PropertyKey<'a>) -> Result<String, ParseError> {
        match key {
            PropertyKey::StaticIdentifier(ident) => Ok(ident.name.to_string()),
            PropertyKey::StringLiteral(lit) => Ok(lit.value.to_string()),
            PropertyKey::NumericLiteral(lit) => Ok(lit.value.to_string()),
            other => Err(self.unsupported("property key", other.span())),
        }
    }

    fn number(&self, value: f64, span: Span) -> Result<Value, ParseError> {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            return Ok(Value::from(value as i64));
        }
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| self.unsupported("non-finite number", span))
    }

    /// `/bg-(red|green)-500/g` → `bg-(red|green)-500`
    fn regex_source(&self, span: Span) -> Result<Value, ParseError> {
        self.source
            .get(span.start as usize..span.end as usize)
            .and_then(|raw| raw.strip_prefix('/'))
            .and_then(|raw| raw.rsplit_once('/'))
            .map(|(body, _flags)| Value::String(body.to_string()))
            .ok_or_else(|| self.unsupported("regular expression", span))
    }

    fn unsupported(&self, expression: &str, span: Span) -> ParseError {
        let (line, column) = line_column(self.source, span.start);
        ParseError::UnsupportedExpression {
            expression: expression.to_string(),
            line,
            column,
        }
    }
}

fn describe(expr: &Expression) -> &'static str {
    match expr {
        Expression::ArrowFunctionExpression(_) => "arrow function",
        Expression::FunctionExpression(_) => "function expression",
        Expression::ClassExpression(_) => "class expression",
        Expression::TemplateLiteral(_) => "template literal with substitutions",
        Expression::BinaryExpression(_) => "binary expression",
        Expression::LogicalExpression(_) => "logical expression",
        Expression::ConditionalExpression(_) => "conditional expression",
        Expression::UnaryExpression(_) => "unary expression",
        Expression::NewExpression(_) => "constructor call",
        Expression::AwaitExpression(_) => "await expression",
        Expression::ComputedMemberExpression(_) => "member expression",
        _ => "expression",
    }
}

/// 1-based line and character column for a byte offset.
fn line_column(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
