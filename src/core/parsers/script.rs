use std::sync::Arc;

use swc_common::{FileName, Globals, SourceMap, Spanned};
use swc_ecma_ast::Program;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax};

use crate::core::ExtractError;

pub struct ParsedScript {
    pub program: Program,
    pub source_map: Arc<SourceMap>,
}

/// Parse JavaScript source into an AST.
///
/// Files are parsed as programs so both ES modules and classic scripts are
/// accepted.
pub fn parse_script_source(code: &str, file_path: &str) -> Result<ParsedScript, ExtractError> {
    use swc_common::GLOBALS;

    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.into()).into(),
            code.to_string(),
        );

        let syntax = Syntax::Es(EsSyntax {
            jsx: false,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let to_parse_error = |e: swc_ecma_parser::error::Error| {
            let line = source_map.lookup_char_pos(e.span().lo).line;
            ExtractError::parse(file_path, Some(line), e.kind().msg())
        };

        let program = parser.parse_program().map_err(to_parse_error)?;

        // Errors the parser recovered from still mean the file is malformed.
        if let Some(error) = parser.take_errors().into_iter().next() {
            return Err(to_parse_error(error));
        }

        Ok(ParsedScript {
            program,
            source_map: source_map.clone(),
        })
    })
}
