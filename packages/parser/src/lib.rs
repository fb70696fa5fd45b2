//! # etergroup-parser
//!
//! Parser and serializer for brace-delimited "group" files used by game
//! asset pipelines:
//!
//! ```text
//! Group	ApplyNumSettings
//! {
//! 	Group	Default
//! 	{
//! 		basis	4	4	4	4
//! 	}
//! }
//! ```
//!
//! Text is classified line by line ([`tokenizer`]), built into an arena tree
//! ([`parser`], [`ast`]), queried and edited by path ([`lookup`]) and written
//! back in canonical form ([`serializer`]). Comment lines travel with the node
//! they follow.

pub mod ast;
pub mod config;
pub mod error;
pub mod lookup;
pub mod parser;
pub mod reader;
pub mod serializer;
pub mod tokenizer;

pub use ast::{GroupTree, Leaf, Node, NodeId, NodeKind, Scalar, Value};
pub use config::GroupConfig;
pub use error::{
    format_errors, GroupError, GroupResult, LookupError, ParseError, ParseErrors, ParseResult,
};
pub use parser::{parse, parse_with_config, Parsed, Parser};
pub use reader::GroupReader;
pub use serializer::{serialize, Serializer};
pub use tokenizer::{classify_line, tokenize, LineKind, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serialize_basic() {
        let source = "Group Wolf\n{\n    Mob 101\n}";
        let tree = parse(source).unwrap();
        assert_eq!(serialize(&tree), "Group\tWolf\n{\n\tMob\t101\n}");
    }
}
