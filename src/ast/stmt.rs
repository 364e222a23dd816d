// Tarn - A tree-walking interpreter for the Tarn scripting language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Statement AST nodes for the Tarn interpreter.

use crate::error::Span;

use super::Expr;

/// A statement in the Tarn language.
#[derive(Debug, Clone)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// The source span of this statement.
    pub span: Span,
}

impl Statement {
    /// Create a new statement.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StatementKind {
    /// A variable declaration.
    Var(VarDecl),

    /// A function declaration.
    Function(FunctionDecl),

    /// A class declaration.
    Class(ClassDecl),

    /// An expression evaluated for its side effects.
    Expression(Expr),

    /// A print statement.
    Print(Expr),

    /// An if statement.
    If(IfStatement),

    /// A while loop.
    While(WhileStatement),

    /// A return statement.
    Return(Option<Expr>),

    /// A braced block with its own scope.
    Block(Vec<Statement>),
}

/// A variable declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    /// The variable name.
    pub name: String,
    /// The span of the name token.
    pub name_span: Span,
    /// Optional initial value.
    pub initializer: Option<Expr>,
    /// The source span of the whole declaration.
    pub span: Span,
}

impl VarDecl {
    /// Create a new variable declaration.
    pub fn new(name: String, name_span: Span, span: Span) -> Self {
        Self {
            name,
            name_span,
            initializer: None,
            span,
        }
    }

    /// Add an initializer to this declaration.
    pub fn with_initializer(mut self, expr: Expr) -> Self {
        self.initializer = Some(expr);
        self
    }
}

/// A function declaration, also used for class methods.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    /// The function name.
    pub name: String,
    /// The span of the name token.
    pub name_span: Span,
    /// The function parameters.
    pub params: Vec<Param>,
    /// The function body. Shares a scope level with the parameters.
    pub body: Vec<Statement>,
    /// The source span of the whole declaration.
    pub span: Span,
}

impl FunctionDecl {
    /// Create a new function declaration.
    pub fn new(
        name: String,
        name_span: Span,
        params: Vec<Param>,
        body: Vec<Statement>,
        span: Span,
    ) -> Self {
        Self {
            name,
            name_span,
            params,
            body,
            span,
        }
    }

    /// Check if this declaration names a constructor.
    pub fn is_initializer(&self) -> bool {
        self.name == "init"
    }
}

/// A function parameter.
#[derive(Debug, Clone)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The source span.
    pub span: Span,
}

impl Param {
    /// Create a new parameter.
    pub fn new(name: String, span: Span) -> Self {
        Self { name, span }
    }
}

/// A class declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// The class name.
    pub name: String,
    /// The span of the name token.
    pub name_span: Span,
    /// Optional superclass, always a `Variable` expression.
    pub superclass: Option<Expr>,
    /// The methods of the class.
    pub methods: Vec<FunctionDecl>,
    /// The source span of the whole declaration.
    pub span: Span,
}

impl ClassDecl {
    /// Create a new class declaration.
    pub fn new(
        name: String,
        name_span: Span,
        superclass: Option<Expr>,
        methods: Vec<FunctionDecl>,
        span: Span,
    ) -> Self {
        Self {
            name,
            name_span,
            superclass,
            methods,
            span,
        }
    }
}

/// An if statement.
#[derive(Debug, Clone)]
pub struct IfStatement {
    /// The condition.
    pub condition: Expr,
    /// The then-branch.
    pub then_branch: Box<Statement>,
    /// Optional else branch.
    pub else_branch: Option<Box<Statement>>,
    /// The source span.
    pub span: Span,
}

/// A while loop.
#[derive(Debug, Clone)]
pub struct WhileStatement {
    /// The loop condition.
    pub condition: Expr,
    /// The loop body.
    pub body: Box<Statement>,
    /// The source span.
    pub span: Span,
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Var(decl) => write!(f, "{}", decl),
            StatementKind::Function(decl) => write!(f, "{}", decl),
            StatementKind::Class(decl) => write!(f, "{}", decl),
            StatementKind::Expression(expr) => write!(f, "{};", expr),
            StatementKind::Print(expr) => write!(f, "print {};", expr),
            StatementKind::If(if_stmt) => write!(f, "{}", if_stmt),
            StatementKind::While(while_stmt) => write!(f, "{}", while_stmt),
            StatementKind::Return(Some(expr)) => write!(f, "return {};", expr),
            StatementKind::Return(None) => write!(f, "return;"),
            StatementKind::Block(statements) => {
                writeln!(f, "{{")?;
                for statement in statements {
                    writeln!(f, "    {}", statement)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl std::fmt::Display for VarDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(init) = &self.initializer {
            write!(f, "var {} = {};", self.name, init)
        } else {
            write!(f, "var {};", self.name)
        }
    }
}

impl std::fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fun {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class {}", self.name)?;
        if let Some(superclass) = &self.superclass {
            write!(f, " < {}", superclass)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({})", self.condition)
    }
}

impl std::fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({})", self.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprId, ExprKind};

    fn expr(kind: ExprKind) -> Expr {
        Expr::new(ExprId::new(0), kind, Span::new(0, 1))
    }

    #[test]
    fn test_var_decl() {
        let decl = VarDecl::new("x".to_string(), Span::new(4, 5), Span::new(0, 10));
        assert_eq!(decl.name, "x");
        assert!(decl.initializer.is_none());
    }

    #[test]
    fn test_var_decl_with_initializer() {
        let init = expr(ExprKind::NumberLiteral(42.0));
        let decl =
            VarDecl::new("x".to_string(), Span::new(4, 5), Span::new(0, 10)).with_initializer(init);
        assert!(decl.initializer.is_some());
    }

    #[test]
    fn test_function_decl() {
        let func = FunctionDecl::new(
            "main".to_string(),
            Span::new(4, 8),
            vec![],
            vec![],
            Span::new(0, 14),
        );
        assert_eq!(func.name, "main");
        assert!(!func.is_initializer());
    }

    #[test]
    fn test_initializer_detection() {
        let func = FunctionDecl::new(
            "init".to_string(),
            Span::new(0, 4),
            vec![],
            vec![],
            Span::new(0, 10),
        );
        assert!(func.is_initializer());
    }

    #[test]
    fn test_display_var_decl() {
        let decl = VarDecl::new("x".to_string(), Span::new(4, 5), Span::new(0, 6));
        assert_eq!(format!("{}", decl), "var x;");

        let init = expr(ExprKind::NumberLiteral(42.0));
        let decl =
            VarDecl::new("x".to_string(), Span::new(4, 5), Span::new(0, 11)).with_initializer(init);
        assert_eq!(format!("{}", decl), "var x = 42;");
    }

    #[test]
    fn test_display_function_with_params() {
        let params = vec![
            Param::new("a".to_string(), Span::new(8, 9)),
            Param::new("b".to_string(), Span::new(11, 12)),
        ];
        let func = FunctionDecl::new(
            "add".to_string(),
            Span::new(4, 7),
            params,
            vec![],
            Span::new(0, 20),
        );
        assert_eq!(format!("{}", func), "fun add(a, b)");
    }

    #[test]
    fn test_display_class_decl() {
        let decl = ClassDecl::new(
            "Cat".to_string(),
            Span::new(6, 9),
            None,
            vec![],
            Span::new(0, 12),
        );
        assert_eq!(format!("{}", decl), "class Cat");

        let superclass = expr(ExprKind::Variable {
            name: "Animal".to_string(),
        });
        let decl = ClassDecl::new(
            "Cat".to_string(),
            Span::new(6, 9),
            Some(superclass),
            vec![],
            Span::new(0, 21),
        );
        assert_eq!(format!("{}", decl), "class Cat < Animal");
    }

    #[test]
    fn test_display_statement_kinds() {
        let span = Span::new(0, 10);

        let stmt = Statement::new(StatementKind::Return(None), span.clone());
        assert_eq!(format!("{}", stmt), "return;");

        let value = expr(ExprKind::NumberLiteral(42.0));
        let stmt = Statement::new(StatementKind::Return(Some(value)), span.clone());
        assert_eq!(format!("{}", stmt), "return 42;");

        let value = expr(ExprKind::StringLiteral("hi".to_string()));
        let stmt = Statement::new(StatementKind::Print(value), span.clone());
        assert_eq!(format!("{}", stmt), "print \"hi\";");

        let inner = Statement::new(
            StatementKind::Expression(expr(ExprKind::NumberLiteral(1.0))),
            span.clone(),
        );
        let stmt = Statement::new(StatementKind::Block(vec![inner]), span);
        assert_eq!(format!("{}", stmt), "{\n    1;\n}");
    }

    #[test]
    fn test_display_if_and_while() {
        let span = Span::new(0, 20);
        let body = Statement::new(StatementKind::Block(vec![]), Span::new(10, 20));

        let if_stmt = IfStatement {
            condition: expr(ExprKind::BoolLiteral(true)),
            then_branch: Box::new(body.clone()),
            else_branch: None,
            span: span.clone(),
        };
        assert_eq!(format!("{}", if_stmt), "if (true)");

        let while_stmt = WhileStatement {
            condition: expr(ExprKind::BoolLiteral(true)),
            body: Box::new(body),
            span,
        };
        assert_eq!(format!("{}", while_stmt), "while (true)");
    }
}
