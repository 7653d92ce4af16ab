//! Small utilities shared by the editor's update and view logic.

/// Today's date as `YYYY-MM-DD`, in the browser's local time.
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Fresh item id. Millisecond timestamps are unique enough for lists
/// edited by one person at a time.
pub fn next_item_id() -> i64 {
    js_sys::Date::now() as i64
}

/// Whether `username` may modify an item created by `owner`. Items from
/// the oldest encodings carry no owner and stay editable by everyone.
pub fn can_modify(owner: Option<&str>, username: &str) -> bool {
    owner.map_or(true, |o| o == username)
}
