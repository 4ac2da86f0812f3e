use crate::expr::Expr;
use crate::token::Token;

/// A statement node.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionData),
    Print(PrintData),
    Var(VarData),
    Block(BlockData),
    If(IfData),
    While(WhileData),
    Function(FunctionData),
    Return(ReturnData),
    Class(ClassData),
}

#[derive(Debug, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// Also used for methods inside a `ClassData`; the resolver tells them apart by
/// the name `init` and by the class-scope it resolves them under, not by shape.
#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ClassData {
    pub name: Token,
    pub superclass: Option<Expr>,
    pub methods: Vec<Stmt>,
}

impl Stmt {
    pub fn accept<T>(&self, visitor: &mut dyn StmtVisitor<T>) -> T {
        match self {
            Stmt::Expression(_) => visitor.visit_expression_stmt(self),
            Stmt::Print(_) => visitor.visit_print_stmt(self),
            Stmt::Var(_) => visitor.visit_var_stmt(self),
            Stmt::Block(_) => visitor.visit_block_stmt(self),
            Stmt::If(_) => visitor.visit_if_stmt(self),
            Stmt::While(_) => visitor.visit_while_stmt(self),
            Stmt::Function(_) => visitor.visit_function_stmt(self),
            Stmt::Return(_) => visitor.visit_return_stmt(self),
            Stmt::Class(_) => visitor.visit_class_stmt(self),
        }
    }
}

pub trait StmtVisitor<T> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_print_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_var_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_block_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_if_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_while_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_function_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_return_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_class_stmt(&mut self, stmt: &Stmt) -> T;
}
