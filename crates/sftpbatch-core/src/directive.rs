// sftpbatch Control-File Parser
//
// Pure parsing only (no IO, easy to test)
//
// OPEN;<server>;<port>
// DOWN;<remote_source>;<local_target>
// UP;<local_source>;<remote_target>
// DIR;<remote_directory>
// CLOSE
//
// ';' is a hard separator, no quoting or escaping.
// Keywords are case-insensitive. Unknown and blank lines are kept and skipped at run time.

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Open { server: String, port: String },
    Close,
    Download { source: String, target: String },
    Upload { source: String, target: String },
    ListDir { path: String },
    Blank,
    Unknown(String),
    /// Known keyword with fewer fields than it needs
    Malformed {
        keyword: String,
        expected: usize,
        found: usize,
    },
}

impl Directive {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return Directive::Blank;
        }

        let parts: Vec<&str> = line.split(';').collect();
        let keyword = parts[0].trim().to_uppercase();

        let expected = match keyword.as_str() {
            "OPEN" | "DOWN" | "UP" => 3,
            "DIR"                  => 2,
            "CLOSE"                => 1,
            _ => return Directive::Unknown(keyword),
        };
        if parts.len() < expected {
            return Directive::Malformed { keyword, expected, found: parts.len() };
        }

        let field = |i: usize| parts[i].to_string();
        match keyword.as_str() {
            "OPEN" => Directive::Open     { server: field(1), port: field(2) },
            "DOWN" => Directive::Download { source: field(1), target: field(2) },
            "UP"   => Directive::Upload   { source: field(1), target: field(2) },
            "DIR"  => Directive::ListDir  { path: field(1) },
            _      => Directive::Close,
        }
    }

    /// Keyword used in logs and error messages
    pub fn keyword(&self) -> &str {
        match self {
            Directive::Open { .. }               => "OPEN",
            Directive::Close                     => "CLOSE",
            Directive::Download { .. }           => "DOWN",
            Directive::Upload { .. }             => "UP",
            Directive::ListDir { .. }            => "DIR",
            Directive::Blank                     => "",
            Directive::Unknown(k)                => k,
            Directive::Malformed { keyword, .. } => keyword,
        }
    }
}

/// A directive together with its 1-based control-file line number
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLine {
    pub number: usize,
    pub directive: Directive,
}

/// Parsed control file, executed strictly in order
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub lines: Vec<ControlLine>,
}

impl Program {
    pub fn parse(text: &str) -> Self {
        let lines = text.lines()
            .enumerate()
            .map(|(i, raw)| ControlLine { number: i + 1, directive: Directive::parse(raw) })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
