// SPDX-License-Identifier: MIT OR Apache-2.0
use proc_macro::{Delimiter, Group, Spacing, TokenStream, TokenTree};

/// Parsed arguments of `#[logged(...)]`.
struct LoggedArgs {
    /// Expression producing a `MessageSource`.
    source: String,
    /// Whether `source` reads the call arguments.
    needs_args: bool,
    /// String literal, as written.
    prefix: Option<String>,
    dont_advance: bool,
}

/// The parts of the decorated function the expansion needs.
struct FnParts {
    is_async: bool,
    params: Vec<String>,
    body_idx: usize,
}

fn error(message: &str) -> TokenStream {
    format!("compile_error!({:?});", message).parse().unwrap()
}

fn is_string_literal(text: &str) -> bool {
    text.starts_with('"') || text.starts_with("r\"") || text.starts_with("r#")
}

/// Splits a token list on commas that are not nested in `<...>`.
fn split_commas(tokens: impl IntoIterator<Item = TokenTree>) -> Vec<Vec<TokenTree>> {
    let mut segments: Vec<Vec<TokenTree>> = vec![Vec::new()];
    let mut angle_depth = 0usize;
    //`->` is not a closing angle bracket
    let mut after_dash = false;
    for token in tokens {
        if let TokenTree::Punct(p) = &token {
            match p.as_char() {
                '<' => angle_depth += 1,
                '>' if !after_dash => angle_depth = angle_depth.saturating_sub(1),
                ',' if angle_depth == 0 => {
                    segments.push(Vec::new());
                    after_dash = false;
                    continue;
                }
                _ => {}
            }
            after_dash = p.as_char() == '-' && p.spacing() == Spacing::Joint;
        } else {
            after_dash = false;
        }
        if let Some(segment) = segments.last_mut() {
            segment.push(token);
        }
    }
    segments.retain(|segment| !segment.is_empty());
    segments
}

fn is_ident(token: Option<&TokenTree>, name: &str) -> bool {
    matches!(token, Some(TokenTree::Ident(i)) if i.to_string() == name)
}

fn is_punct(token: Option<&TokenTree>, c: char) -> bool {
    matches!(token, Some(TokenTree::Punct(p)) if p.as_char() == c)
}

fn parse_args(attr: TokenStream) -> Result<LoggedArgs, TokenStream> {
    let mut source = None;
    let mut needs_args = false;
    let mut prefix = None;
    let mut dont_advance = false;

    for segment in split_commas(attr) {
        let message = if let [TokenTree::Literal(lit)] = segment.as_slice() {
            let text = lit.to_string();
            if !is_string_literal(&text) {
                return Err(error("#[logged] expects a string literal message"));
            }
            if text.contains('{') {
                Some(format!(
                    "::nestlog::decorate::MessageSource::Literal(::std::format!({text}))"
                ))
            } else {
                Some(format!("::nestlog::decorate::MessageSource::literal({text})"))
            }
        } else if segment.len() == 1 && is_ident(segment.first(), "dont_advance") {
            dont_advance = true;
            None
        } else if is_ident(segment.first(), "prefix") && is_punct(segment.get(1), '=') {
            match segment.get(2..) {
                Some([TokenTree::Literal(lit)]) if is_string_literal(&lit.to_string()) => {
                    prefix = Some(lit.to_string());
                }
                _ => return Err(error("#[logged]: prefix must be a string literal")),
            }
            None
        } else if is_ident(segment.first(), "from_args")
            && is_punct(segment.get(1), '=')
            && segment.len() > 2
        {
            let path: TokenStream = segment[2..].iter().cloned().collect();
            needs_args = true;
            Some(format!("::nestlog::decorate::MessageSource::derived({path})"))
        } else {
            return Err(error(
                "#[logged] expects a message literal or `from_args = function`, optionally followed by `prefix = \"...\"` and `dont_advance`",
            ));
        };
        if let Some(message) = message {
            if source.is_some() {
                return Err(error("#[logged] accepts only one message"));
            }
            source = Some(message);
        }
    }

    match source {
        Some(source) => Ok(LoggedArgs {
            source,
            needs_args,
            prefix,
            dont_advance,
        }),
        None => Err(error("#[logged] requires a message")),
    }
}

/// Names of the simple `name: Type` parameters. Receivers and patterns are skipped.
fn param_names(params: &Group) -> Vec<String> {
    let mut names = Vec::new();
    for segment in split_commas(params.stream()) {
        let mut i = 0;
        //outer attributes, `#[...]`
        while is_punct(segment.get(i), '#') {
            i += 2;
        }
        if is_ident(segment.get(i), "mut") {
            i += 1;
        }
        if let (Some(TokenTree::Ident(name)), true) =
            (segment.get(i), is_punct(segment.get(i + 1), ':'))
        {
            let name = name.to_string();
            if name != "self" && name != "_" {
                names.push(name);
            }
        }
    }
    names
}

fn parse_fn(tokens: &[TokenTree]) -> Result<FnParts, TokenStream> {
    let fn_idx = tokens
        .iter()
        .position(|t| is_ident(Some(t), "fn"))
        .ok_or_else(|| error("#[logged] can only be applied to functions"))?;
    let is_async = tokens[..fn_idx].iter().any(|t| is_ident(Some(t), "async"));

    // the parameter list is the first parenthesized group after the name that is not
    // part of the generics
    let mut params = None;
    let mut angle_depth = 0usize;
    let mut after_dash = false;
    for token in tokens.get(fn_idx + 2..).unwrap_or(&[]) {
        match token {
            TokenTree::Punct(p) => {
                match p.as_char() {
                    '<' => angle_depth += 1,
                    '>' if !after_dash => angle_depth = angle_depth.saturating_sub(1),
                    _ => {}
                }
                after_dash = p.as_char() == '-' && p.spacing() == Spacing::Joint;
            }
            TokenTree::Group(g) if g.delimiter() == Delimiter::Parenthesis && angle_depth == 0 => {
                params = Some(g.clone());
                break;
            }
            _ => after_dash = false,
        }
    }
    let params = params.ok_or_else(|| error("#[logged]: expected a parameter list"))?;

    let body_idx = tokens.len().saturating_sub(1);
    match tokens.get(body_idx) {
        Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {}
        _ => return Err(error("#[logged] requires a function with a body")),
    }

    Ok(FnParts {
        is_async,
        params: param_names(&params),
        body_idx,
    })
}

/// Implementation of the `#[logged]` attribute macro.
///
/// Prepends the body with a call into `nestlog::hidden`. Synchronous functions keep the
/// returned guard alive for the whole body, so the body's lines nest under the message.
/// `async` functions only log the message, when the future is first polled.
pub fn logged_attr_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse_args(attr) {
        Ok(args) => args,
        Err(e) => return e,
    };
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();
    let parts = match parse_fn(&tokens) {
        Ok(parts) => parts,
        Err(e) => return e,
    };

    let mut call_args = "::nestlog::decorate::CallArgs::new()".to_string();
    if args.needs_args {
        for name in &parts.params {
            let key = name.strip_prefix("r#").unwrap_or(name);
            call_args.push_str(&format!(".arg({:?}, &{})", key, name));
        }
    }
    let prefix = match &args.prefix {
        Some(prefix) => format!("::core::option::Option::Some({prefix})"),
        None => "::core::option::Option::None".to_string(),
    };
    let options = format!(
        "::nestlog::LogOptions {{ prefix: {prefix}, dont_advance: {} }}",
        args.dont_advance
    );
    let source = &args.source;
    let pre = if parts.is_async {
        format!("::nestlog::hidden::logged_async_pre(&{source}, &{call_args}, {options});")
    } else {
        format!(
            "let __nestlog_guard = ::nestlog::hidden::logged_sync_pre(&{source}, &{call_args}, {options});"
        )
    };

    let mut body: TokenStream = match pre.parse() {
        Ok(body) => body,
        Err(_) => return error("#[logged]: could not parse the message expression"),
    };
    let original = tokens[parts.body_idx].clone();
    let span = original.span();
    body.extend([original]);
    let mut group = Group::new(Delimiter::Brace, body);
    group.set_span(span);
    tokens[parts.body_idx] = TokenTree::Group(group);

    tokens.into_iter().collect()
}
