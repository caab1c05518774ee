// sftpbatch Utils
//
// - permission_str : unix permission bits → "drwxr-xr-x"
// - mtime_str      : unix timestamp → ls -l style date
// - fmt_size       : bytes → human readable (1.2MB etc.)

use chrono::{DateTime, Datelike, Local, LocalResult, TimeZone, Timelike, Utc};

/// unix permission bits → "drwxr-xr-x"
pub fn permission_str(p: u32) -> String {
    let file_type = match p & 0o170000 {
        0o040000 => 'd',  // S_IFDIR
        0o120000 => 'l',  // S_IFLNK
        0o060000 => 'b',  // S_IFBLK
        0o020000 => 'c',  // S_IFCHR
        0o010000 => 'p',  // S_IFIFO
        0o140000 => 's',  // S_IFSOCK
        _        => '-',
    };

    const BITS: [(u32, char); 9] = [
        (0o400, 'r'), (0o200, 'w'), (0o100, 'x'),
        (0o040, 'r'), (0o020, 'w'), (0o010, 'x'),
        (0o004, 'r'), (0o002, 'w'), (0o001, 'x'),
    ];

    let mut s = String::with_capacity(10);
    s.push(file_type);
    for (bit, ch) in BITS {
        s.push(if p & bit != 0 { ch } else { '-' });
    }
    s
}

/// unix timestamp → ls -l style date
///
/// - within the last 6 months: "Jun 22 15:30"
/// - older:                    "Jun 22  2025"
pub fn mtime_str(ts: u64) -> String {
    let dt: DateTime<Local> = match Utc.timestamp_opt(ts as i64, 0) {
        LocalResult::Single(utc) => utc.with_timezone(&Local),
        _ => return "?".to_string(),
    };

    let six_months_ago = Local::now() - chrono::Duration::days(180);

    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun",
        "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let mon = MONTHS[(dt.month() - 1) as usize];

    if dt > six_months_ago {
        format!("{} {:2} {:02}:{:02}", mon, dt.day(), dt.hour(), dt.minute())
    } else {
        format!("{} {:2}  {}", mon, dt.day(), dt.year())
    }
}

pub fn fmt_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB      { format!("{:.1}GB", bytes as f64 / GB as f64) }
    else if bytes >= MB { format!("{:.1}MB", bytes as f64 / MB as f64) }
    else if bytes >= KB { format!("{:.1}KB", bytes as f64 / KB as f64) }
    else                { format!("{}B",     bytes) }
}
