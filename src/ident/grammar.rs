use winnow::combinator::{opt, terminated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

// -- Character classes ------------------------------------------------------

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

// -- Segments ---------------------------------------------------------------

fn namespace<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_namespace_char).parse_next(input)
}

fn path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_path_char)
        .context(StrContext::Expected(StrContextValue::Description("path")))
        .parse_next(input)
}

// -- Top-level parser -------------------------------------------------------

/// `[namespace ':'] path`. The caller lowercases the input first.
pub fn resource_id<'i>(input: &mut &'i str) -> ModalResult<(Option<&'i str>, &'i str)> {
    (opt(terminated(namespace, ':')), path).parse_next(input)
}
