//! Pratt Parser expression parsing

use super::ast::*;
use super::state::*;

impl<'a> ParserState<'a> {
    /// Parse an expression using Pratt parser
    ///
    /// # Arguments
    /// * `min_bp` - Minimum binding power an infix form needs to continue
    ///
    /// # Algorithm
    /// 1. Parse prefix expression (nud)
    /// 2. While the next token continues the expression with a left binding
    ///    power >= `min_bp`, parse the infix form (led), handing it the right
    ///    binding power for its operand
    pub fn parse_expression(
        &mut self,
        min_bp: u8,
    ) -> Option<Expr> {
        let prefix_fn = match self.prefix_info() {
            Some(prefix_fn) => prefix_fn,
            None => {
                self.error_expected(&["expression".to_string()]);
                return None;
            }
        };

        let mut lhs = prefix_fn(self)?;

        loop {
            if self.at_end() {
                break;
            }

            let (left_bp, right_bp, infix_fn) = match self.infix_info(&lhs) {
                Some(info) => info,
                None => break,
            };

            if left_bp < min_bp {
                break;
            }

            lhs = infix_fn(self, lhs, right_bp)?;
        }

        Some(lhs)
    }
}
