// Event construction and logging macros

/// Build a [`CustomEvent`](crate::CustomEvent) inline
///
/// The type must be a string literal; a blank one fails to compile.
///
/// ```rust
/// use custom_events::custom_event;
///
/// let event = custom_event!("draft_saved", "draft_id" => 42, "words" => 1200);
/// assert_eq!(event.event_type(), &"draft_saved");
///
/// let bare = custom_event!("password_changed");
/// assert!(bare.data().is_none());
/// ```
///
/// ```rust,compile_fail
/// let blank = custom_events::custom_event!("  ");
/// ```
#[macro_export]
macro_rules! custom_event {
    (@build $event_type:literal, $data:expr) => {{
        const _: () = ::core::assert!(
            !$crate::is_blank_tag($event_type),
            "custom event type must not be blank"
        );
        $crate::CustomEvent::from_checked_parts($crate::EventType::from_static($event_type), $data)
    }};
    ($event_type:literal $(,)?) => {
        $crate::custom_event!(@build $event_type, ::core::option::Option::None)
    };
    ($event_type:literal, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::EventData::new();
        $( data.insert_field($key, &$value); )+
        $crate::custom_event!(@build $event_type, ::core::option::Option::Some(data))
    }};
}

#[macro_export]
macro_rules! event_info {
    ($message:expr, $source:expr) => {
        $crate::logging::log_event($crate::tracing::Level::INFO, $message, &$source)
    };
}

#[macro_export]
macro_rules! event_warn {
    ($message:expr, $source:expr) => {
        $crate::logging::log_event($crate::tracing::Level::WARN, $message, &$source)
    };
}

#[macro_export]
macro_rules! event_error {
    ($message:expr, $source:expr) => {
        $crate::logging::log_event($crate::tracing::Level::ERROR, $message, &$source)
    };
}
