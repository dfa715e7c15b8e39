//! AeroHUD 메인 애플리케이션.
//!
//! iced 0.13 daemon 기반 멀티 윈도우 GUI.
//! 프레임 없는 메인 HUD 창 + 컴팩트 플로팅 위젯, 시스템 트레이 연동.
//! 두 창 모두 측정은 하지 않고 수집기 스냅샷만 그린다.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use iced::widget::{button, column, container, horizontal_space, mouse_area, row, text, Space};
use iced::{
    event, mouse, window, Alignment, Background, Border, Element, Event, Length, Point, Size,
    Subscription, Task, Theme,
};
use tracing::{debug, info, warn};

use aerohud_core::settings::{OverlayMode, PerformanceMode};
use aerohud_core::store::SettingsStore;
use aerohud_monitor::HudMonitor;

use crate::theme::{
    ThemeColors, ACCENT_CPU, ACCENT_DISK, ACCENT_GPU, ACCENT_NET, ACCENT_RAM, ACCENT_TEMP,
};
use crate::tray::{TrayEvent, TrayManager};
use crate::views::metric_card;

/// 메인 HUD 창 크기
const MAIN_WINDOW_SIZE: (f32, f32) = (300.0, 400.0);
const MAIN_WINDOW_MIN_SIZE: (f32, f32) = (250.0, 350.0);
/// 플로팅 위젯 기본/최소 크기
const WIDGET_SIZE: (f32, f32) = (180.0, 120.0);
const WIDGET_MIN_SIZE: (f32, f32) = (150.0, 100.0);
/// 위젯 자동 숨김 대기 시간
const AUTO_HIDE_DELAY: Duration = Duration::from_millis(2000);
/// 자동 숨김 마감 검사 주기 (마감이 걸려 있을 때만 구독)
const AUTO_HIDE_POLL: Duration = Duration::from_millis(250);

/// 네이티브 API에서 창을 찾을 때 쓰는 제목
const MAIN_WINDOW_TITLE: &str = "AeroHUD";
const WIDGET_TITLE: &str = "AeroHUD Widget";

/// 앱 메시지 (사용자 액션 및 이벤트)
#[derive(Debug, Clone)]
pub enum Message {
    // 주기적 업데이트
    /// 메트릭 수집 틱 (성능 모드 주기)
    Tick(Instant),
    /// 자동 숨김 마감 검사 틱
    AutoHideTick(Instant),

    // 창 수명 주기
    /// 메인 창 생성 완료
    MainWindowOpened(window::Id),
    /// 위젯 창 생성 완료
    WidgetOpened(window::Id),
    /// 창 이동 (위치 저장)
    WindowMoved(window::Id, Point),
    /// 창 닫힘
    WindowClosed(window::Id),
    /// 창 닫기 요청 (X 버튼)
    CloseRequested(window::Id),

    // 포인터/드래그
    /// 메인 창 드래그 시작
    DragMainWindow,
    /// 위젯 드래그 시작
    DragWidget,
    /// 위젯 우하단 리사이즈 시작
    BeginWidgetResize,
    PointerMoved(window::Id, Point),
    PointerReleased(window::Id),
    PointerEntered(window::Id),
    PointerExited(window::Id),

    // 창 제어
    /// 메인 창 최소화
    MinimizeMainWindow,
    /// 메인 창 숨기기 (트레이로)
    HideMainWindow,
    /// 메인 창 표시 + 포커스
    ShowMainWindow,
    /// 위젯 표시/숨기기
    ToggleWidget,
    /// 위젯 닫기 (설정에도 반영)
    CloseWidget,

    // 설정 변경
    ToggleTheme,
    ToggleOverlayMode,
    SetPerformanceMode(PerformanceMode),
    ToggleAutoHide,
    ToggleClickThrough,
    SetWidgetOpacity(f64),
    ToggleStartup,

    /// 앱 종료
    Quit,
}

impl Message {
    /// 트레이 이벤트를 동일 의미의 앱 메시지로 변환한다.
    fn from_tray(event: TrayEvent) -> Self {
        match event {
            TrayEvent::ShowMainWindow => Message::ShowMainWindow,
            TrayEvent::ToggleWidget => Message::ToggleWidget,
            TrayEvent::ToggleOverlayMode => Message::ToggleOverlayMode,
            TrayEvent::ToggleStartup => Message::ToggleStartup,
            TrayEvent::ToggleTheme => Message::ToggleTheme,
            TrayEvent::SetPerformanceMode(mode) => Message::SetPerformanceMode(mode),
            TrayEvent::ToggleAutoHide => Message::ToggleAutoHide,
            TrayEvent::ToggleClickThrough => Message::ToggleClickThrough,
            TrayEvent::SetWidgetOpacity(opacity) => Message::SetWidgetOpacity(opacity),
            TrayEvent::Quit => Message::Quit,
        }
    }
}

fn overlay_level(mode: OverlayMode) -> window::Level {
    match mode {
        OverlayMode::AllScreens => window::Level::AlwaysOnTop,
        OverlayMode::DesktopOnly => window::Level::Normal,
    }
}

/// AeroHUD 애플리케이션 상태
pub struct HudApp {
    settings: SettingsStore,
    monitor: HudMonitor,
    /// 트레이 매니저 (드롭 방지 + 체크 상태 동기화)
    tray: Option<TrayManager>,
    tray_rx: Option<mpsc::Receiver<TrayEvent>>,
    main_window: Option<window::Id>,
    widget: Option<window::Id>,
    /// 위젯 창이 현재 화면에 보이는지 (Mode::Windowed)
    widget_shown: bool,
    widget_size: Size,
    resizing_widget: bool,
    /// 자동 숨김 마감 시각. 걸려 있는 동안만 보조 타이머 구독
    widget_hide_at: Option<Instant>,
}

impl HudApp {
    pub fn new(
        settings: SettingsStore,
        tray: Option<TrayManager>,
        tray_rx: Option<mpsc::Receiver<TrayEvent>>,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            settings,
            monitor: HudMonitor::new(),
            tray,
            tray_rx,
            main_window: None,
            widget: None,
            widget_shown: false,
            widget_size: Size::new(WIDGET_SIZE.0, WIDGET_SIZE.1),
            resizing_widget: false,
            widget_hide_at: None,
        };

        let mut tasks = vec![app.open_main_window()];
        if app.settings.get().widget_visible {
            tasks.push(app.open_widget());
        }
        (app, Task::batch(tasks))
    }

    fn open_main_window(&mut self) -> Task<Message> {
        let settings = self.settings.get();
        let [x, y] = settings.main_window_position;
        let (id, open) = window::open(window::Settings {
            size: Size::new(MAIN_WINDOW_SIZE.0, MAIN_WINDOW_SIZE.1),
            min_size: Some(Size::new(MAIN_WINDOW_MIN_SIZE.0, MAIN_WINDOW_MIN_SIZE.1)),
            position: window::Position::Specific(Point::new(x as f32, y as f32)),
            resizable: false,
            decorations: false,
            transparent: true,
            level: overlay_level(settings.overlay_mode),
            exit_on_close_request: false,
            ..window::Settings::default()
        });
        self.main_window = Some(id);
        open.map(Message::MainWindowOpened)
    }

    fn open_widget(&mut self) -> Task<Message> {
        let settings = self.settings.get();
        let [x, y] = settings.widget_position;
        let (id, open) = window::open(window::Settings {
            size: self.widget_size,
            min_size: Some(Size::new(WIDGET_MIN_SIZE.0, WIDGET_MIN_SIZE.1)),
            position: window::Position::Specific(Point::new(x as f32, y as f32)),
            resizable: false,
            decorations: false,
            transparent: true,
            level: overlay_level(settings.overlay_mode),
            exit_on_close_request: false,
            ..window::Settings::default()
        });
        self.widget = Some(id);
        self.widget_shown = true;
        open.map(Message::WidgetOpened)
    }

    /// 위젯에 클릭 통과/투명도를 네이티브로 적용한다.
    fn apply_widget_native(&self) {
        let settings = self.settings.get();
        let enabled = settings.widget_click_through;
        let opacity = settings.widget_opacity;
        #[cfg(target_os = "windows")]
        {
            crate::native_windows::set_click_through(WIDGET_TITLE, enabled, opacity);
        }
        #[cfg(target_os = "macos")]
        {
            crate::native_macos::set_click_through(WIDGET_TITLE, enabled);
            crate::native_macos::set_window_opacity(WIDGET_TITLE, opacity);
        }
        #[cfg(target_os = "linux")]
        {
            // Linux: 네이티브 클릭 통과 미지원, 투명도는 뷰 배경으로 처리
            let _ = (enabled, opacity);
            debug!("Linux: 위젯 네이티브 효과 생략");
        }
    }

    fn sync_tray(&self) {
        if let Some(tray) = &self.tray {
            tray.sync(self.settings.get());
        }
    }

    /// 창 제목. 네이티브 API가 이 제목으로 창을 찾는다.
    pub fn title(&self, window: window::Id) -> String {
        if Some(window) == self.widget {
            WIDGET_TITLE.to_string()
        } else {
            MAIN_WINDOW_TITLE.to_string()
        }
    }

    pub fn theme(&self, _window: window::Id) -> Theme {
        match self.settings.get().theme {
            aerohud_core::settings::Theme::Dark => Theme::Dark,
            aerohud_core::settings::Theme::Light => Theme::Light,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(_now) => {
                self.monitor.update_all();

                // 트레이 이벤트 폴링 (논블로킹)
                let mut pending = Vec::new();
                if let Some(rx) = &self.tray_rx {
                    while let Ok(event) = rx.try_recv() {
                        debug!("트레이 이벤트: {:?}", event);
                        pending.push(event);
                    }
                }
                let tasks: Vec<Task<Message>> = pending
                    .into_iter()
                    .map(|event| self.update(Message::from_tray(event)))
                    .collect();
                Task::batch(tasks)
            }

            Message::AutoHideTick(now) => {
                let deadline_passed = self.widget_hide_at.is_some_and(|at| now >= at);
                if deadline_passed && self.widget_shown {
                    self.widget_hide_at = None;
                    self.widget_shown = false;
                    if let Some(id) = self.widget {
                        debug!("위젯 자동 숨김");
                        return window::change_mode(id, window::Mode::Hidden);
                    }
                }
                Task::none()
            }

            Message::MainWindowOpened(id) => {
                info!("메인 창 생성: {id:?}");
                Task::none()
            }

            Message::WidgetOpened(id) => {
                info!("위젯 창 생성: {id:?}");
                self.apply_widget_native();
                if self.settings.get().widget_auto_hide {
                    self.widget_hide_at = Some(Instant::now() + AUTO_HIDE_DELAY);
                }
                Task::none()
            }

            Message::WindowMoved(id, position) => {
                if Some(id) == self.main_window {
                    self.settings
                        .set_main_window_position(position.x as i32, position.y as i32);
                } else if Some(id) == self.widget {
                    self.settings
                        .set_widget_position(position.x as i32, position.y as i32);
                }
                Task::none()
            }

            Message::WindowClosed(id) => {
                if Some(id) == self.widget {
                    self.widget = None;
                    self.widget_shown = false;
                    self.widget_hide_at = None;
                } else if Some(id) == self.main_window {
                    self.main_window = None;
                }
                Task::none()
            }

            Message::CloseRequested(id) => {
                if Some(id) == self.main_window {
                    // 종료 대신 트레이로 숨김
                    info!("메인 창 숨김 (트레이 유지)");
                    window::change_mode(id, window::Mode::Hidden)
                } else if Some(id) == self.widget {
                    self.update(Message::CloseWidget)
                } else {
                    Task::none()
                }
            }

            Message::DragMainWindow => match self.main_window {
                Some(id) => window::drag(id),
                None => Task::none(),
            },

            Message::DragWidget => match self.widget {
                Some(id) => window::drag(id),
                None => Task::none(),
            },

            Message::BeginWidgetResize => {
                self.resizing_widget = true;
                Task::none()
            }

            Message::PointerMoved(id, position) => {
                if self.resizing_widget && Some(id) == self.widget {
                    // 커서 위치가 곧 새 크기. 최소 크기 바닥 적용
                    let new_size = Size::new(
                        position.x.max(WIDGET_MIN_SIZE.0),
                        position.y.max(WIDGET_MIN_SIZE.1),
                    );
                    self.widget_size = new_size;
                    return window::resize(id, new_size);
                }
                Task::none()
            }

            Message::PointerReleased(_id) => {
                self.resizing_widget = false;
                Task::none()
            }

            Message::PointerEntered(id) => {
                if Some(id) == self.widget && self.settings.get().widget_auto_hide {
                    self.widget_hide_at = None;
                    if !self.widget_shown {
                        self.widget_shown = true;
                        return window::change_mode(id, window::Mode::Windowed);
                    }
                }
                Task::none()
            }

            Message::PointerExited(id) => {
                if Some(id) == self.widget
                    && self.settings.get().widget_auto_hide
                    && self.widget_shown
                {
                    self.widget_hide_at = Some(Instant::now() + AUTO_HIDE_DELAY);
                }
                Task::none()
            }

            Message::MinimizeMainWindow => match self.main_window {
                Some(id) => window::minimize(id, true),
                None => Task::none(),
            },

            Message::HideMainWindow => match self.main_window {
                Some(id) => window::change_mode(id, window::Mode::Hidden),
                None => Task::none(),
            },

            Message::ShowMainWindow => match self.main_window {
                Some(id) => Task::batch([
                    window::change_mode(id, window::Mode::Windowed),
                    window::gain_focus(id),
                ]),
                None => self.open_main_window(),
            },

            Message::ToggleWidget => {
                if self.widget.is_none() {
                    self.settings.set_widget_visible(true);
                    self.open_widget()
                } else if self.widget_shown {
                    self.widget_shown = false;
                    self.widget_hide_at = None;
                    self.settings.set_widget_visible(false);
                    match self.widget {
                        Some(id) => window::change_mode(id, window::Mode::Hidden),
                        None => Task::none(),
                    }
                } else {
                    self.widget_shown = true;
                    self.settings.set_widget_visible(true);
                    match self.widget {
                        Some(id) => window::change_mode(id, window::Mode::Windowed),
                        None => Task::none(),
                    }
                }
            }

            Message::CloseWidget => {
                self.settings.set_widget_visible(false);
                self.widget_shown = false;
                self.widget_hide_at = None;
                match self.widget.take() {
                    Some(id) => window::close(id),
                    None => Task::none(),
                }
            }

            Message::ToggleTheme => {
                let theme = self.settings.toggle_theme();
                info!("테마 변경: {theme:?}");
                self.sync_tray();
                Task::none()
            }

            Message::ToggleOverlayMode => {
                let mode = self.settings.toggle_overlay_mode();
                info!("오버레이 모드: {mode:?}");
                self.sync_tray();
                let level = overlay_level(mode);
                let mut tasks = Vec::new();
                if let Some(id) = self.main_window {
                    tasks.push(window::change_level(id, level));
                }
                if let Some(id) = self.widget {
                    tasks.push(window::change_level(id, level));
                }
                Task::batch(tasks)
            }

            Message::SetPerformanceMode(mode) => {
                // 주기는 subscription()이 다음 호출에서 바꾼다
                self.settings.set_performance_mode(mode);
                info!("성능 모드: {mode:?} ({:?})", mode.tick_interval());
                self.sync_tray();
                Task::none()
            }

            Message::ToggleAutoHide => {
                let enabled = self.settings.toggle_auto_hide();
                self.sync_tray();
                if let Some(id) = self.widget {
                    if enabled {
                        if self.widget_shown {
                            self.widget_hide_at = Some(Instant::now() + AUTO_HIDE_DELAY);
                        }
                    } else {
                        self.widget_hide_at = None;
                        if !self.widget_shown {
                            self.widget_shown = true;
                            return window::change_mode(id, window::Mode::Windowed);
                        }
                    }
                }
                Task::none()
            }

            Message::ToggleClickThrough => {
                let enabled = self.settings.toggle_click_through();
                info!("클릭 통과: {enabled}");
                self.sync_tray();
                if self.widget.is_some() {
                    self.apply_widget_native();
                }
                Task::none()
            }

            Message::SetWidgetOpacity(opacity) => {
                self.settings.set_widget_opacity(opacity);
                self.sync_tray();
                if self.widget.is_some() {
                    self.apply_widget_native();
                }
                Task::none()
            }

            Message::ToggleStartup => {
                let enabled = self.settings.toggle_startup();
                info!("시작 프로그램: {enabled}");
                self.sync_tray();
                Task::none()
            }

            Message::Quit => {
                info!("앱 종료");
                if let Err(e) = self.settings.save() {
                    warn!("종료 시 설정 저장 실패: {e}");
                }
                iced::exit()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let interval = self.settings.get().performance_mode.tick_interval();
        let mut subs = vec![
            iced::time::every(interval).map(Message::Tick),
            event::listen_with(|event, _status, id| match event {
                Event::Window(window::Event::CloseRequested) => {
                    Some(Message::CloseRequested(id))
                }
                Event::Window(window::Event::Moved(position)) => {
                    Some(Message::WindowMoved(id, position))
                }
                Event::Window(window::Event::Closed) => Some(Message::WindowClosed(id)),
                Event::Mouse(mouse::Event::CursorEntered) => Some(Message::PointerEntered(id)),
                Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerExited(id)),
                Event::Mouse(mouse::Event::CursorMoved { position }) => {
                    Some(Message::PointerMoved(id, position))
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    Some(Message::PointerReleased(id))
                }
                _ => None,
            }),
        ];
        if self.widget_hide_at.is_some() {
            subs.push(iced::time::every(AUTO_HIDE_POLL).map(Message::AutoHideTick));
        }
        Subscription::batch(subs)
    }

    pub fn view(&self, window: window::Id) -> Element<'_, Message> {
        if Some(window) == self.widget {
            self.view_widget()
        } else if Some(window) == self.main_window {
            self.view_main()
        } else {
            horizontal_space().into()
        }
    }

    // ── 메인 HUD 창 ──

    fn view_main(&self) -> Element<'_, Message> {
        let colors = ThemeColors::for_theme(self.settings.get().theme);
        let snapshot = self.monitor.snapshot();

        // 헤더: 드래그 영역 + 최소화/숨기기 버튼
        let header = row![
            mouse_area(
                row![text("AeroSys").size(16).color(colors.text_primary)]
                    .width(Length::Fill)
                    .padding(4),
            )
            .on_press(Message::DragMainWindow),
            control_button("—", Message::MinimizeMainWindow, colors),
            control_button("✕", Message::HideMainWindow, colors),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        // 2x3 메트릭 그리드
        let grid = column![
            row![
                metric_card(
                    "CPU",
                    format!("{}%", snapshot.cpu_usage),
                    snapshot.cpu_usage as f32,
                    ACCENT_CPU,
                    &colors,
                ),
                metric_card(
                    "RAM",
                    format!("{}%", snapshot.ram_usage),
                    snapshot.ram_usage as f32,
                    ACCENT_RAM,
                    &colors,
                ),
            ]
            .spacing(8),
            row![
                metric_card(
                    "GPU",
                    format!("{}%", snapshot.gpu_usage),
                    snapshot.gpu_usage as f32,
                    ACCENT_GPU,
                    &colors,
                ),
                metric_card(
                    "NET",
                    format!("↑ {}", snapshot.network_upload),
                    0.0,
                    ACCENT_NET,
                    &colors,
                ),
            ]
            .spacing(8),
            row![
                metric_card(
                    "TEMP",
                    format!("{}°C", snapshot.temperature),
                    0.0,
                    ACCENT_TEMP,
                    &colors,
                ),
                metric_card(
                    "DISK",
                    format!("{}%", snapshot.disk_usage),
                    snapshot.disk_usage as f32,
                    ACCENT_DISK,
                    &colors,
                ),
            ]
            .spacing(8),
        ]
        .spacing(8);

        let clock = column![
            text(snapshot.current_time.clone())
                .size(26)
                .color(colors.text_primary),
            text(snapshot.current_date.clone())
                .size(12)
                .color(colors.text_secondary),
        ]
        .spacing(2)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let footer = row![
            footer_button("Widget", Message::ToggleWidget, colors),
            footer_button("Theme", Message::ToggleTheme, colors),
        ]
        .spacing(8);

        container(
            column![header, grid, clock, footer]
                .spacing(12)
                .width(Length::Fill),
        )
        .padding(14)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(colors.background)),
            border: Border {
                color: colors.card_border,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..container::Style::default()
        })
        .into()
    }

    // ── 플로팅 위젯 ──

    fn view_widget(&self) -> Element<'_, Message> {
        let settings = self.settings.get();
        let colors = ThemeColors::for_theme(settings.theme);
        let snapshot = self.monitor.snapshot();

        // Linux: 네이티브 창 투명도가 없으니 배경 알파로 대신한다
        #[cfg(target_os = "linux")]
        let background = {
            let mut color = colors.widget_background;
            color.a *= settings.widget_opacity as f32;
            color
        };
        #[cfg(not(target_os = "linux"))]
        let background = colors.widget_background;

        let header = row![
            mouse_area(
                row![text("AeroSys").size(11).color(colors.text_secondary)]
                    .width(Length::Fill)
                    .padding(2),
            )
            .on_press(Message::DragWidget),
            control_button("☰", Message::ShowMainWindow, colors),
            control_button("✕", Message::CloseWidget, colors),
        ]
        .spacing(4)
        .align_y(Alignment::Center);

        let metrics = row![
            widget_stat("CPU", format!("{}%", snapshot.cpu_usage), colors),
            widget_stat("RAM", format!("{}%", snapshot.ram_usage), colors),
        ]
        .spacing(12)
        .width(Length::Fill);

        let clock = text(snapshot.current_time.clone())
            .size(16)
            .color(colors.text_primary)
            .width(Length::Fill)
            .align_x(Alignment::Center);

        // 우하단 리사이즈 핫존
        let resize_handle = row![
            horizontal_space(),
            mouse_area(Space::new(Length::Fixed(12.0), Length::Fixed(12.0)))
                .on_press(Message::BeginWidgetResize),
        ];

        container(
            column![header, metrics, clock, resize_handle]
                .spacing(6)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: colors.widget_border,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..container::Style::default()
        })
        .into()
    }
}

/// 헤더용 작은 컨트롤 버튼
fn control_button(
    label: &str,
    message: Message,
    colors: ThemeColors,
) -> Element<'_, Message> {
    button(text(label).size(11).color(colors.text_secondary))
        .on_press(message)
        .padding(4)
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(colors.button)),
            text_color: colors.text_primary,
            border: Border {
                radius: 4.0.into(),
                ..Border::default()
            },
            ..button::Style::default()
        })
        .into()
}

/// 푸터용 와이드 버튼
fn footer_button(
    label: &str,
    message: Message,
    colors: ThemeColors,
) -> Element<'_, Message> {
    button(
        text(label)
            .size(12)
            .color(colors.text_primary)
            .width(Length::Fill)
            .align_x(Alignment::Center),
    )
    .on_press(message)
    .width(Length::Fill)
    .padding(6)
    .style(move |_theme, _status| button::Style {
        background: Some(Background::Color(colors.button)),
        text_color: colors.text_primary,
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    })
    .into()
}

/// 위젯용 컴팩트 수치 표시
fn widget_stat(label: &str, value: String, colors: ThemeColors) -> Element<'_, Message> {
    column![
        text(label).size(9).color(colors.text_secondary),
        text(value).size(14).color(colors.text_primary),
    ]
    .spacing(1)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerohud_core::settings::Theme as SettingsTheme;
    use tempfile::TempDir;

    fn test_app() -> (HudApp, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.json")).unwrap();
        let (app, _task) = HudApp::new(store, None, None);
        (app, dir)
    }

    #[test]
    fn app_creation() {
        let (app, _dir) = test_app();
        assert!(app.main_window.is_some());
        assert!(app.widget.is_none()); // 기본값: 위젯 숨김
        assert!(!app.resizing_widget);
    }

    #[test]
    fn toggle_theme_round_trip() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.settings.get().theme, SettingsTheme::Dark);
        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.settings.get().theme, SettingsTheme::Light);
        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.settings.get().theme, SettingsTheme::Dark);
    }

    #[test]
    fn toggle_overlay_mode_two_cycle() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleOverlayMode);
        assert_eq!(app.settings.get().overlay_mode, OverlayMode::AllScreens);
        let _ = app.update(Message::ToggleOverlayMode);
        assert_eq!(app.settings.get().overlay_mode, OverlayMode::DesktopOnly);
    }

    #[test]
    fn set_performance_mode_persists() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::SetPerformanceMode(PerformanceMode::LowPower));
        assert_eq!(
            app.settings.get().performance_mode,
            PerformanceMode::LowPower
        );
        assert_eq!(
            app.settings.get().performance_mode.tick_interval(),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn opacity_clamped_through_message() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::SetWidgetOpacity(2.0));
        assert_eq!(app.settings.get().widget_opacity, 1.0);
        let _ = app.update(Message::SetWidgetOpacity(0.0));
        assert_eq!(app.settings.get().widget_opacity, 0.1);
    }

    #[test]
    fn toggle_widget_opens_then_hides() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        assert!(app.widget.is_some());
        assert!(app.widget_shown);
        assert!(app.settings.get().widget_visible);

        let _ = app.update(Message::ToggleWidget);
        assert!(!app.widget_shown);
        assert!(!app.settings.get().widget_visible);
    }

    #[test]
    fn widget_resize_respects_min_size() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        let widget_id = app.widget.unwrap();

        let _ = app.update(Message::BeginWidgetResize);
        let _ = app.update(Message::PointerMoved(widget_id, Point::new(50.0, 40.0)));
        assert_eq!(app.widget_size, Size::new(150.0, 100.0));

        let _ = app.update(Message::PointerMoved(widget_id, Point::new(300.0, 200.0)));
        assert_eq!(app.widget_size, Size::new(300.0, 200.0));

        let _ = app.update(Message::PointerReleased(widget_id));
        assert!(!app.resizing_widget);
    }

    #[test]
    fn auto_hide_armed_on_pointer_exit() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        let widget_id = app.widget.unwrap();
        let _ = app.update(Message::ToggleAutoHide);
        assert!(app.settings.get().widget_auto_hide);
        assert!(app.widget_hide_at.is_some());

        // 포인터가 들어오면 마감 해제
        let _ = app.update(Message::PointerEntered(widget_id));
        assert!(app.widget_hide_at.is_none());

        // 나가면 다시 걸림
        let _ = app.update(Message::PointerExited(widget_id));
        assert!(app.widget_hide_at.is_some());
    }

    #[test]
    fn auto_hide_deadline_hides_widget() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        let _ = app.update(Message::ToggleAutoHide);
        let deadline = app.widget_hide_at.unwrap();

        // 마감 전에는 그대로
        let _ = app.update(Message::AutoHideTick(deadline - Duration::from_millis(500)));
        assert!(app.widget_shown);

        // 마감이 지나면 숨김
        let _ = app.update(Message::AutoHideTick(deadline + Duration::from_millis(1)));
        assert!(!app.widget_shown);
        assert!(app.widget_hide_at.is_none());
    }

    #[test]
    fn click_through_keeps_widget_visible() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        let _ = app.update(Message::ToggleClickThrough);
        assert!(app.settings.get().widget_click_through);
        assert!(app.widget_shown); // 클릭 통과는 표시 상태를 바꾸지 않는다
    }

    #[test]
    fn window_move_persists_position() {
        let (mut app, _dir) = test_app();
        let main_id = app.main_window.unwrap();
        let _ = app.update(Message::WindowMoved(main_id, Point::new(320.0, 240.0)));
        assert_eq!(app.settings.get().main_window_position, [320, 240]);

        let _ = app.update(Message::ToggleWidget);
        let widget_id = app.widget.unwrap();
        let _ = app.update(Message::WindowMoved(widget_id, Point::new(800.0, 60.0)));
        assert_eq!(app.settings.get().widget_position, [800, 60]);
    }

    #[test]
    fn close_widget_updates_settings() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ToggleWidget);
        assert!(app.settings.get().widget_visible);

        let _ = app.update(Message::CloseWidget);
        assert!(app.widget.is_none());
        assert!(!app.settings.get().widget_visible);
    }

    #[test]
    fn tray_event_mapping() {
        assert!(matches!(
            Message::from_tray(TrayEvent::Quit),
            Message::Quit
        ));
        assert!(matches!(
            Message::from_tray(TrayEvent::SetPerformanceMode(
                PerformanceMode::HighPerformance
            )),
            Message::SetPerformanceMode(PerformanceMode::HighPerformance)
        ));
    }
}
