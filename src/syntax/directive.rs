//! Decoding of annotation head lists into the closed set of passage directives.

use crate::{
    err_span,
    syntax::{sexp::SExp, Span},
    IridiumError,
};

/// A decoded `#(...)` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `#(option "target")`, opens an option label.
    Option { target: String },
    /// `#(image "target")`
    Image { target: String },
    /// `#(end)`, closes an option label.
    End,
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Option { .. } => "option",
            Directive::Image { .. } => "image",
            Directive::End => "end",
        }
    }

    /// Validates the shape of an annotation's head list. `span` locates the list.
    pub fn from_sexp(head: &SExp, span: Span) -> Result<Self, IridiumError> {
        let name = match head.nth(0) {
            Some(SExp::Symbol(name)) => name.as_str(),
            Some(other) => {
                let help = if other.is_string() {
                    "directive names are bare words: write `option`, not `\"option\"`"
                } else {
                    "annotations start with a directive name such as `option` or `image`"
                };
                return Err(err_span!(Structural, span, "unsupported block type {}", other).with_help(help));
            }
            None => return Err(err_span!(Structural, span, "unsupported block type ()")),
        };

        match name {
            "option" => {
                let target = string_argument(head, name, "name", span)?;
                no_extra_arguments(head, 2, "option name", span)?;
                Ok(Directive::Option { target })
            }
            "image" => {
                let target = string_argument(head, name, "target", span)?;
                no_extra_arguments(head, 2, "image target", span)?;
                Ok(Directive::Image { target })
            }
            "end" => {
                no_extra_arguments(head, 1, "end", span)?;
                Ok(Directive::End)
            }
            other => Err(err_span!(Structural, span, "unsupported block type {}", other)),
        }
    }
}

fn string_argument(head: &SExp, directive: &str, what: &str, span: Span) -> Result<String, IridiumError> {
    match head.nth(1) {
        Some(SExp::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(SExp::String(_)) => Err(err_span!(Structural, span, "empty {} supplied after {}", what, directive)),
        Some(other) => {
            let err = err_span!(
                Structural,
                span,
                "{} {} must be a quoted string, found {}",
                directive,
                what,
                other
            );
            if other.is_symbol() {
                Err(err.with_help(format!("write #({} \"{}\")", directive, other)))
            } else {
                Err(err)
            }
        }
        None => Err(err_span!(Structural, span, "no {} supplied after {}", what, directive)),
    }
}

fn no_extra_arguments(head: &SExp, arity: usize, after: &str, span: Span) -> Result<(), IridiumError> {
    match head.nth(arity) {
        Some(extra) => Err(err_span!(Structural, span, "extra junk after {}: {}", after, extra)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(items: Vec<SExp>) -> Result<Directive, IridiumError> {
        Directive::from_sexp(&SExp::list(items), Span::default())
    }

    #[test]
    fn test_option() {
        let d = decode(vec![SExp::symbol("option"), SExp::string("next")]).unwrap();
        assert_eq!(d, Directive::Option { target: "next".into() });
    }

    #[test]
    fn test_image() {
        let d = decode(vec![SExp::symbol("IMAGE"), SExp::string("map.png")]).unwrap();
        assert_eq!(d, Directive::Image { target: "map.png".into() });
    }

    #[test]
    fn test_end() {
        assert_eq!(decode(vec![SExp::symbol("end")]).unwrap(), Directive::End);
    }

    #[test]
    fn test_option_requires_string_name() {
        let err = decode(vec![SExp::symbol("option")]).unwrap_err();
        assert_eq!(err.message(), "no name supplied after option");
        let err = decode(vec![SExp::symbol("option"), SExp::symbol("next")]).unwrap_err();
        assert_eq!(err.message(), "option name must be a quoted string, found next");
        let err = decode(vec![SExp::symbol("option"), SExp::string("")]).unwrap_err();
        assert_eq!(err.message(), "empty name supplied after option");
    }

    #[test]
    fn test_trailing_arguments_rejected() {
        let err = decode(vec![
            SExp::symbol("option"),
            SExp::string("next"),
            SExp::string("extra"),
        ])
        .unwrap_err();
        assert_eq!(err.message(), "extra junk after option name: \"extra\"");
        let err = decode(vec![SExp::symbol("end"), SExp::symbol("option")]).unwrap_err();
        assert_eq!(err.message(), "extra junk after end: option");
    }

    #[test]
    fn test_unknown_and_non_symbol_heads() {
        let err = decode(vec![SExp::symbol("bogus")]).unwrap_err();
        assert_eq!(err.message(), "unsupported block type bogus");
        let err = decode(vec![SExp::string("option")]).unwrap_err();
        assert_eq!(err.message(), "unsupported block type \"option\"");
        let err = decode(vec![]).unwrap_err();
        assert_eq!(err.message(), "unsupported block type ()");
    }

    #[test]
    fn test_help_depends_on_argument_kind() {
        use miette::Diagnostic;

        let help = |err: &IridiumError| err.help().map(|h| h.to_string());

        let err = decode(vec![SExp::symbol("option"), SExp::symbol("next")]).unwrap_err();
        assert_eq!(help(&err).as_deref(), Some("write #(option \"next\")"));
        let err = decode(vec![SExp::symbol("image"), SExp::list(vec![SExp::symbol("a")])]).unwrap_err();
        assert_eq!(err.message(), "image target must be a quoted string, found (a)");
        assert_eq!(help(&err), None);

        let err = decode(vec![SExp::string("option")]).unwrap_err();
        assert!(help(&err).unwrap().contains("bare words"));
        let err = decode(vec![SExp::list(vec![SExp::symbol("option")])]).unwrap_err();
        assert!(help(&err).unwrap().contains("directive name"));
    }
}
