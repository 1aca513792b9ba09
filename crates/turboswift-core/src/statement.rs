//! Statement compiler - turns a method's raw body tokens into typed statements
//!
//! Shapes, tried in this order at each position:
//!
//! ```text
//! let VAR = ALIAS . CLASS ( ) ;        Construct
//! TARGET . METHOD ( [arg {, arg}] ) ;  Call
//! print ( arg ) ;                      Print
//! let VAR = arg ;                      Let
//! arg := "string" | INTEGER | NAME
//! ```
//!
//! In [`StatementMode::Strict`] a position matching none of the shapes is an
//! [`Error::UnrecognizedStatement`]. [`StatementMode::Lenient`] skips one
//! token and tries again, and does not require the trailing `;`.

use crate::parser::ast::Func;
use crate::parser::tokenizer::Token;
use crate::{Error, Result, StatementMode};

/// A literal or a field lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Str(String),
    Int(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Bind a freshly constructed host object
    Construct {
        var: String,
        alias: String,
        class: String,
    },
    /// Call a method on an object held in a field
    Call {
        target: String,
        method: String,
        args: Vec<Operand>,
    },
    Print(Operand),
    Let { var: String, value: Operand },
}

/// Compile a method body; nothing runs until the whole body compiled
pub fn compile(func: &Func, mode: StatementMode) -> Result<Vec<Stmt>> {
    let tokens = func.body.as_slice();
    let mut compiler = Compiler {
        tokens,
        pos: 0,
        mode,
    };
    let mut stmts = Vec::new();

    while let Some(token) = tokens.get(compiler.pos) {
        match compiler.statement()? {
            Some(stmt) => stmts.push(stmt),
            None if mode == StatementMode::Lenient => compiler.pos += 1,
            None => {
                return Err(Error::UnrecognizedStatement {
                    method: func.name.clone(),
                    index: compiler.pos,
                    token: token.to_string(),
                });
            }
        }
    }

    Ok(stmts)
}

type Shape<'a> = fn(&mut Compiler<'a>) -> Result<Option<Stmt>>;

struct Compiler<'a> {
    tokens: &'a [Token],
    pos: usize,
    mode: StatementMode,
}

impl<'a> Compiler<'a> {
    /// Try every shape at the cursor; on success the cursor sits past the statement
    fn statement(&mut self) -> Result<Option<Stmt>> {
        let start = self.pos;
        let shapes: [Shape<'a>; 4] = [Self::construct, Self::call, Self::print, Self::assign];

        for shape in shapes {
            self.pos = start;
            if let Some(stmt) = shape(self)? {
                return Ok(Some(stmt));
            }
        }

        self.pos = start;
        Ok(None)
    }

    // ── Cursor helpers ─────────────────────────────────────

    fn next_if(&mut self, accept: impl FnOnce(&Token) -> bool) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos).filter(|t| accept(*t))?;
        self.pos += 1;
        Some(token)
    }

    fn symbol(&mut self, text: &str) -> Option<()> {
        self.next_if(|t| *t == text).map(|_| ())
    }

    fn keyword(&mut self, text: &str) -> Option<()> {
        self.symbol(text)
    }

    fn ident(&mut self) -> Option<String> {
        self.next_if(Token::is_identifier).map(Token::to_string)
    }

    fn terminator(&mut self) -> Option<()> {
        match self.mode {
            StatementMode::Strict => self.symbol(";"),
            StatementMode::Lenient => {
                let _ = self.symbol(";");
                Some(())
            }
        }
    }

    /// `None` when the next token is not an operand at all
    fn operand(&mut self) -> Option<Result<Operand>> {
        let token = self.next_if(|t| !t.is_symbol())?;
        let operand = if let Some(text) = token.string_contents() {
            Ok(Operand::Str(text.to_string()))
        } else if token.is_integer() {
            token
                .as_str()
                .parse()
                .map(Operand::Int)
                .map_err(|_| Error::InvalidInteger(token.to_string()))
        } else {
            Ok(Operand::Name(token.to_string()))
        };
        Some(operand)
    }

    // ── Shapes ─────────────────────────────────────────────

    fn construct(&mut self) -> Result<Option<Stmt>> {
        let parsed = (|| {
            self.keyword("let")?;
            let var = self.ident()?;
            self.symbol("=")?;
            let alias = self.ident()?;
            self.symbol(".")?;
            let class = self.ident()?;
            self.symbol("(")?;
            self.symbol(")")?;
            self.terminator()?;
            Some(Stmt::Construct { var, alias, class })
        })();
        Ok(parsed)
    }

    fn call(&mut self) -> Result<Option<Stmt>> {
        let head = (|| {
            let target = self.ident()?;
            self.symbol(".")?;
            let method = self.ident()?;
            self.symbol("(")?;
            Some((target, method))
        })();
        let Some((target, method)) = head else {
            return Ok(None);
        };

        let mut args = Vec::new();
        if self.symbol(")").is_none() {
            loop {
                let Some(arg) = self.operand() else {
                    return Ok(None);
                };
                args.push(arg?);
                if self.symbol(",").is_some() {
                    continue;
                }
                if self.symbol(")").is_some() {
                    break;
                }
                return Ok(None);
            }
        }

        Ok(self.terminator().map(|()| Stmt::Call {
            target,
            method,
            args,
        }))
    }

    fn print(&mut self) -> Result<Option<Stmt>> {
        if self.keyword("print").and_then(|()| self.symbol("(")).is_none() {
            return Ok(None);
        }
        let Some(arg) = self.operand() else {
            return Ok(None);
        };
        let arg = arg?;
        let closed = self.symbol(")").and_then(|()| self.terminator());
        Ok(closed.map(|()| Stmt::Print(arg)))
    }

    fn assign(&mut self) -> Result<Option<Stmt>> {
        let head = (|| {
            self.keyword("let")?;
            let var = self.ident()?;
            self.symbol("=")?;
            Some(var)
        })();
        let Some(var) = head else {
            return Ok(None);
        };
        let Some(value) = self.operand() else {
            return Ok(None);
        };
        let value = value?;
        Ok(self.terminator().map(|()| Stmt::Let { var, value }))
    }
}
