/// This is the prefix used in logs to identify a started service.
///
/// For example:
///
/// ```text
/// 2024-06-25T12:36:25.025527Z  INFO STATUS API: Started on: http://127.0.0.1:8080
/// ```
pub const STARTED_ON: &str = "Started on";
