//! Tolerant parser for the textual transform syntax.
//!
//! Parsing never fails: malformed input degrades to the fewest recognized
//! ops. Completed operations before a malformed one are kept; the malformed
//! tail is dropped entirely, including anything textually after it. A single
//! bad attribute must not take down an entire diagram's rendering.

use glam::dvec2;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::log::debug;

use super::{TransformList, TransformOp};

#[derive(Parser)]
#[grammar = "transform.pest"]
struct TransformParser;

/// Parse a transform attribute value into an ordered [`TransformList`].
///
/// Function names are case-insensitive; parameters are separated by commas
/// and/or whitespace. Unrecognized function names and wrong arities are
/// skipped without stopping the scan; a syntactically malformed operation
/// stops the scan for the remainder of the string.
pub fn parse_transform_list(input: &str) -> TransformList {
    let mut ops = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }
        let pair = match TransformParser::parse(Rule::operation, rest) {
            Ok(mut pairs) => pairs.next().expect("operation rule yields one pair"),
            Err(_) => {
                debug!("malformed transform op, dropping tail: {:?}", rest);
                break;
            }
        };
        let consumed = pair.as_span().end();
        if let Some(op) = op_from_pair(pair) {
            ops.push(op);
        }
        rest = &rest[consumed..];
    }
    TransformList::new(ops)
}

/// Map a syntactically valid `name(params)` pair to a concrete op.
///
/// Returns `None` for unknown names and invalid arities; the caller keeps
/// scanning either way.
fn op_from_pair(pair: Pair<Rule>) -> Option<TransformOp> {
    let mut inner = pair.into_inner();
    let name = inner.next().expect("operation starts with ident").as_str().to_ascii_lowercase();
    let params: Vec<f64> = match inner.next() {
        Some(arguments) => arguments
            .into_inner()
            .map(|n| n.as_str().parse::<f64>().expect("number token is a valid float"))
            .collect(),
        None => Vec::new(),
    };

    let op = match (name.as_str(), params.len()) {
        ("translate", 1) => TransformOp::Translate { tx: params[0], ty: 0.0 },
        ("translate", n) if n >= 2 => TransformOp::Translate { tx: params[0], ty: params[1] },
        ("rotate", 1) => TransformOp::Rotate { angle: params[0], center: None },
        ("rotate", n) if n >= 3 => TransformOp::Rotate {
            angle: params[0],
            center: Some(dvec2(params[1], params[2])),
        },
        ("scale", 1) => TransformOp::Scale { sx: params[0], sy: params[0] },
        ("scale", n) if n >= 2 => TransformOp::Scale { sx: params[0], sy: params[1] },
        ("matrix", 6) => TransformOp::Matrix {
            a: params[0],
            b: params[1],
            c: params[2],
            d: params[3],
            e: params[4],
            f: params[5],
        },
        ("skewx", 1) => TransformOp::SkewX { angle: params[0] },
        ("skewy", 1) => TransformOp::SkewY { angle: params[0] },
        _ => {
            debug!("skipping transform op {:?} with {} params", name, params.len());
            return None;
        }
    };
    Some(op)
}
