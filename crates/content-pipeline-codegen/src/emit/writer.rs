//! Indent-aware line builder for generated C#

/// Indentation unit of generated code
const INDENT: &str = "    ";

/// Quote `value` as a regular C# string literal
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\0' => literal.push_str("\\0"),
            other => literal.push(other),
        }
    }
    literal.push('"');
    literal
}

/// Builds source text line by line
#[derive(Debug, Default)]
pub struct SourceWriter {
    code: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a file with the nullable-context directive every artifact carries
    pub fn file() -> Self {
        let mut writer = Self::new();
        writer.line("// <auto-generated/>");
        writer.line("#nullable enable");
        writer
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.code.push('\n');
            return self;
        }
        for _ in 0..self.depth {
            self.code.push_str(INDENT);
        }
        self.code.push_str(text);
        self.code.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.code.push('\n');
        self
    }

    /// Write several lines at the current depth
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line.as_ref());
        }
        self
    }

    pub fn usings<S: AsRef<str>>(&mut self, namespaces: &[S]) -> &mut Self {
        for namespace in namespaces {
            self.line(&format!("using {};", namespace.as_ref()));
        }
        self
    }

    /// File-scoped namespace declaration followed by a blank line
    pub fn namespace(&mut self, namespace: &str) -> &mut Self {
        self.line(&format!("namespace {namespace};"));
        self.blank()
    }

    /// `/// <summary>` block
    pub fn summary(&mut self, text: &str) -> &mut Self {
        self.line("/// <summary>");
        self.line(&format!("/// {text}"));
        self.line("/// </summary>")
    }

    /// Write `header` unless empty, then `{` and indent
    pub fn open(&mut self, header: &str) -> &mut Self {
        if !header.is_empty() {
            self.line(header);
        }
        self.line("{");
        self.depth += 1;
        self
    }

    /// Dedent and write `}`
    pub fn close(&mut self) -> &mut Self {
        self.close_with("}")
    }

    /// Dedent and write a closing line such as `};`
    pub fn close_with(&mut self, text: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub fn finish(self) -> String {
        self.code
    }
}
