pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod scope;
pub mod value;

pub use ast::{Expr, Operation, Position, Query, Statement, Token, TokenKind};
pub use evaluator::Path;
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty, to_value};
pub use parser::{ParseError, Parser, SyntaxError};
pub use scope::{Error, ErrorKind, Scope, Scopes};
pub use value::{MapScope, StringScope, Value};
