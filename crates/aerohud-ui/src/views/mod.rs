//! 뷰 컴포넌트 모듈.

pub mod metric_card;

pub use metric_card::metric_card;
