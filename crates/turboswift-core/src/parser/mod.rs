//! TurboSwift Parser - tokenizer, AST types, and recursive descent parser
//!
//! Converts a token stream into a [`Program`]: one [`Contract`] per
//! `contract` block, with imports, typed fields and method signatures.
//! Method bodies are kept as raw token slices; [`crate::statement`]
//! compiles them when a method is executed.
//!
//! Grammar (tokens outside these shapes are skipped):
//!
//! ```text
//! program  := ( contract | import | <any> )*
//! import   := "import" MODULE "aka" ALIAS ";"
//! contract := "contract" NAME "{" member* "}"
//! member   := import
//!           | ACCESS "var" NAME [ ":" TYPE ] [ ";" ]
//!           | ACCESS "func" NAME "(" params ")" [ "->" TYPE ] "{" body "}"
//! ```

pub mod ast;
pub mod tokenizer;

use tracing::debug;

use crate::{Error, Result};
use ast::{Access, Contract, Func, Program, VarDecl, UNKNOWN_TYPE, VOID_TYPE};
use tokenizer::{Token, ARROW};

/// Parse a token stream into a program
///
/// # Guarantees
/// - Deterministic: same tokens always produce the same AST
/// - All-or-nothing: the first syntax error aborts with no partial AST
///
/// # Errors
/// Returns [`Error::Syntax`] with the offending token index and the unmet expectation.
pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

/// Tokenize and parse source text in one step
pub fn parse_source(source: &str) -> Result<Program> {
    parse(&tokenizer::tokenize(source))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    // ── Cursor helpers ─────────────────────────────────────

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| *t == text)
    }

    fn expect(&mut self, text: &str) -> Result<()> {
        if self.check(text) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(text))
        }
    }

    /// Take whatever token is next, failing only at end of input
    fn take(&mut self, what: &str) -> Result<&'a Token> {
        let token = self.peek().ok_or_else(|| self.unexpected(what))?;
        self.pos += 1;
        Ok(token)
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::syntax(self.pos, expected, self.peek().map(Token::as_str))
    }

    // ── Top level ──────────────────────────────────────────

    fn parse_program(&mut self) -> Result<Program> {
        let mut program = Program::default();

        while let Some(token) = self.peek() {
            if *token == "contract" {
                let contract = self.parse_contract()?;
                debug!(
                    contract = %contract.name,
                    vars = contract.vars.len(),
                    methods = contract.methods.len(),
                    "parsed contract"
                );
                program.contracts.insert(contract.name.clone(), contract);
            } else if *token == "import" {
                // Top-level imports have no table to land in
                let (module, alias) = self.parse_import()?;
                debug!(%module, %alias, "ignoring top-level import");
            } else {
                self.pos += 1;
            }
        }

        Ok(program)
    }

    /// `import MODULE aka ALIAS ;` → (module, alias)
    fn parse_import(&mut self) -> Result<(String, String)> {
        self.expect("import")?;
        let module = self.take("module name")?.to_string();
        self.expect("aka")?;
        let alias = self.take("alias")?.to_string();
        self.expect(";")?;
        Ok((module, alias))
    }

    // ── Contracts ──────────────────────────────────────────

    fn parse_contract(&mut self) -> Result<Contract> {
        self.expect("contract")?;
        let name = self.take("contract name")?;
        let mut contract = Contract::new(name.as_str());
        self.expect("{")?;

        while let Some(token) = self.peek() {
            if *token == "}" {
                break;
            }
            if *token == "import" {
                let (module, alias) = self.parse_import()?;
                contract.imports.insert(alias, module);
            } else if let Some(access) = Access::from_keyword(token.as_str()) {
                self.pos += 1;
                self.parse_member(access, &mut contract)?;
            } else {
                self.pos += 1;
            }
        }

        self.expect("}")?;
        Ok(contract)
    }

    fn parse_member(&mut self, access: Access, contract: &mut Contract) -> Result<()> {
        let keyword = self.take("var' or 'func")?;
        match keyword.as_str() {
            "var" => {
                let (name, decl) = self.parse_var(access)?;
                contract.vars.insert(name, decl);
            }
            "func" => {
                let func = self.parse_func(access)?;
                debug!(
                    contract = %contract.name,
                    method = %func.name,
                    body_tokens = func.body.len(),
                    "parsed method"
                );
                contract.methods.insert(func.name.clone(), func);
            }
            // Anything else after an access modifier is skipped along with it
            _ => {}
        }
        Ok(())
    }

    // ── Fields ─────────────────────────────────────────────

    fn parse_var(&mut self, access: Access) -> Result<(String, VarDecl)> {
        let name = self.take("variable name")?.to_string();
        let type_label = if self.check(":") {
            self.pos += 1;
            self.take("type")?.to_string()
        } else {
            UNKNOWN_TYPE.to_string()
        };
        if self.check(";") {
            self.pos += 1;
        }
        let decl = VarDecl {
            access,
            type_label,
            value: None,
        };
        Ok((name, decl))
    }

    // ── Methods ────────────────────────────────────────────

    fn parse_func(&mut self, access: Access) -> Result<Func> {
        let name = self.take("function name")?.to_string();
        self.expect("(")?;
        let params = self.parse_params();
        self.expect(")")?;

        let return_type = if self.check(ARROW) {
            self.pos += 1;
            self.take("return type")?.to_string()
        } else {
            VOID_TYPE.to_string()
        };

        self.expect("{")?;
        let body = self.capture_body();
        self.expect("}")?;

        Ok(Func {
            name,
            access,
            params,
            return_type,
            body,
        })
    }

    /// Collect parameter names up to `)`; a `: Type` annotation after a name is dropped
    fn parse_params(&mut self) -> Vec<String> {
        let mut params = Vec::new();
        let mut at_group_start = true;

        while let Some(token) = self.peek() {
            if *token == ")" {
                break;
            }
            if *token == "," {
                at_group_start = true;
            } else if at_group_start {
                params.push(token.to_string());
                at_group_start = false;
            }
            self.pos += 1;
        }

        params
    }

    /// Tokens up to the `}` that balances the already-consumed opening brace.
    /// Leaves the cursor on that `}` (or at end of input).
    fn capture_body(&mut self) -> Vec<Token> {
        let start = self.pos;
        let mut depth = 1usize;

        while let Some(token) = self.peek() {
            if *token == "{" {
                depth += 1;
            } else if *token == "}" {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            self.pos += 1;
        }

        self.tokens[start..self.pos].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_err(input: &str) -> Error {
        parse_source(input).unwrap_err()
    }

    // ── Contracts & fields ─────────────────────────────

    #[test]
    fn test_parse_empty_contract() {
        let program = parse_source("contract C { }").unwrap();
        assert_eq!(program.contracts.len(), 1);
        assert_eq!(program.contract("C").unwrap(), &Contract::new("C"));
    }

    #[test]
    fn test_parse_typed_var() {
        let program = parse_source("contract C { public var x : Int ; }").unwrap();
        let c = program.contract("C").unwrap();
        assert_eq!(
            c.vars["x"],
            VarDecl {
                access: Access::Public,
                type_label: "Int".into(),
                value: None,
            }
        );
    }

    #[test]
    fn test_parse_untyped_private_var() {
        let program = parse_source("contract C { private var secret }").unwrap();
        let decl = &program.contract("C").unwrap().vars["secret"];
        assert_eq!(decl.access, Access::Private);
        assert_eq!(decl.type_label, UNKNOWN_TYPE);
    }

    #[test]
    fn test_parse_contract_imports_last_alias_wins() {
        let program = parse_source(
            "contract App { import grey aka g; import blue aka g; import grey aka ui; }",
        )
        .unwrap();
        let imports = &program.contract("App").unwrap().imports;
        assert_eq!(imports.len(), 2);
        assert_eq!(imports["g"], "blue");
        assert_eq!(imports["ui"], "grey");
    }

    #[test]
    fn test_top_level_import_is_discarded() {
        let program = parse_source("import grey aka grey; contract App { }").unwrap();
        assert!(program.contract("App").unwrap().imports.is_empty());
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let program =
            parse_source("junk ; contract C { stray 42 public var x ; public static y }").unwrap();
        let c = program.contract("C").unwrap();
        assert_eq!(c.vars.len(), 1);
        assert!(c.methods.is_empty());
    }

    // ── Methods ────────────────────────────────────────

    #[test]
    fn test_parse_func_with_return_type() {
        let program = parse_source("contract C { public func f() -> Int { } }").unwrap();
        let f = program.contract("C").unwrap().method("f").unwrap();
        assert_eq!(f.return_type, "Int");
        assert!(f.body.is_empty());
    }

    #[test]
    fn test_parse_func_defaults_to_void() {
        let program = parse_source("contract C { private func f() { } }").unwrap();
        let f = program.contract("C").unwrap().method("f").unwrap();
        assert_eq!(f.return_type, VOID_TYPE);
        assert_eq!(f.access, Access::Private);
    }

    #[test]
    fn test_parse_params_drop_types() {
        let program =
            parse_source("contract C { public func f(a, b : String, c) { } }").unwrap();
        let f = program.contract("C").unwrap().method("f").unwrap();
        assert_eq!(f.params, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_body_keeps_nested_braces() {
        let program =
            parse_source("contract C { public func f() { a { b } c ; } public var x ; }").unwrap();
        let c = program.contract("C").unwrap();
        let body: Vec<&str> = c.method("f").unwrap().body.iter().map(Token::as_str).collect();
        assert_eq!(body, vec!["a", "{", "b", "}", "c", ";"]);
        assert!(c.vars.contains_key("x"));
    }

    #[test]
    fn test_multiple_contracts() {
        let program = parse_source(
            "contract A { public func run() { print(\"a\"); } }\ncontract B { public var n : Int; }",
        )
        .unwrap();
        let names: Vec<&String> = program.contracts.keys().collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    // ── Syntax errors ──────────────────────────────────

    #[test]
    fn test_missing_contract_brace() {
        assert_eq!(
            parse_err("contract C public var x ;"),
            Error::Syntax {
                index: 2,
                expected: "{".into(),
                found: "public".into(),
            }
        );
    }

    #[test]
    fn test_unclosed_contract_reports_eof() {
        let err = parse_err("contract C { public var x : Int ;");
        assert_eq!(err.to_string(), "Expected '}' at token 9, got 'EOF'");
    }

    #[test]
    fn test_unclosed_param_list() {
        let err = parse_err("contract C { public func f(a, b");
        assert_eq!(err.to_string(), "Expected ')' at token 10, got 'EOF'");
    }

    #[test]
    fn test_func_without_param_list() {
        let err = parse_err("contract C { public func f { } }");
        assert_eq!(err.to_string(), "Expected '(' at token 6, got '{'");
    }

    #[test]
    fn test_unclosed_func_body() {
        let err = parse_err("contract C { public func f() { print(\"x\");");
        assert_eq!(
            err,
            Error::Syntax {
                index: 14,
                expected: "}".into(),
                found: "EOF".into(),
            }
        );
    }

    #[test]
    fn test_import_requires_aka() {
        let err = parse_err("contract C { import grey as g; }");
        assert_eq!(err.to_string(), "Expected 'aka' at token 5, got 'as'");
    }

    #[test]
    fn test_import_requires_semicolon() {
        let err = parse_err("import grey aka g contract C { }");
        assert_eq!(err.to_string(), "Expected ';' at token 4, got 'contract'");
    }

    // ── Determinism proof ──────────────────────────────

    #[test]
    fn test_parse_determinism_100_iterations() {
        let input = "contract App { import grey aka grey; public var n : Int; \
                     public func main() -> Void { let w = grey.GRC(); w.title(\"Hi\"); } }";
        let first = parse_source(input).unwrap();

        for i in 0..100 {
            let result = parse_source(input).unwrap();
            assert_eq!(first, result, "Determinism failure at iteration {}", i);
        }
    }
}
