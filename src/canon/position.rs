/// Position extraction
use crate::declarations::Span;
use crate::records::AstPosition;

/// Map a declaration span to the record position.
pub fn ast_position(span: &Span) -> AstPosition {
    AstPosition {
        start_line: span.begin_line,
        start_column: span.begin_column,
        end_line: span.end_line,
        end_column: span.end_column,
    }
}
