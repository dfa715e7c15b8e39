//! 메트릭 카드 컴포넌트.
//!
//! 레이블 + 값 + 가는 진행 바 한 장. 메인 HUD 창의 2x3 그리드에 쓰인다.

use iced::widget::{column, container, progress_bar, text};
use iced::{Alignment, Background, Border, Element, Length};

use crate::theme::ThemeColors;

/// 메트릭 카드 한 장을 만든다.
///
/// `fraction`은 0~100 스케일의 진행 바 값. 퍼센트가 아닌 메트릭
/// (네트워크, 온도)은 0을 넘겨 바를 비워 둔다.
pub fn metric_card<'a, Message: 'a>(
    label: &'a str,
    value: String,
    fraction: f32,
    accent: iced::Color,
    colors: &ThemeColors,
) -> Element<'a, Message> {
    let colors = *colors;
    container(
        column![
            text(label).size(10).color(colors.text_secondary),
            text(value).size(15).color(colors.text_primary),
            progress_bar(0.0..=100.0, fraction.clamp(0.0, 100.0))
                .height(5)
                .style(move |_theme| progress_bar::Style {
                    background: Background::Color(colors.progress_track),
                    bar: Background::Color(accent),
                    border: Border {
                        radius: 2.0.into(),
                        ..Border::default()
                    },
                }),
        ]
        .spacing(4)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(10)
    .style(move |_theme| container::Style {
        background: Some(Background::Color(colors.card)),
        border: Border {
            color: colors.card_border,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    })
    .into()
}
