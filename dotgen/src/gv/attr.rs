//! Attributes and the attribute stores that graph elements own.

/// A single attribute value. The value knows how to render itself as a DOT
/// literal: identifiers and numbers are emitted as bare tokens, and
/// everything else is emitted as a quoted string.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl AttrValue {
    /// \return the DOT literal form of the value.
    pub fn to_gv(&self) -> String {
        match self {
            AttrValue::Text(text) => {
                if is_identifier(text) {
                    text.clone()
                } else {
                    quote(text)
                }
            }
            AttrValue::Int(num) => num.to_string(),
            AttrValue::Float(num) => num.to_string(),
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        AttrValue::Text(String::new())
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}
impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}
impl From<i64> for AttrValue {
    fn from(num: i64) -> Self {
        AttrValue::Int(num)
    }
}
impl From<i32> for AttrValue {
    fn from(num: i32) -> Self {
        AttrValue::Int(num as i64)
    }
}
impl From<f64> for AttrValue {
    fn from(num: f64) -> Self {
        AttrValue::Float(num)
    }
}

/// Return true if \p text can be emitted as a bare DOT token: an
/// alphanumeric identifier that does not start with a digit, or a numeral.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if first.is_ascii_digit() || first == '-' || first == '.' {
        return is_numeral(text);
    }
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '.' {
            if seen_dot {
                return false;
            }
            seen_dot = true;
        } else if c.is_ascii_digit() {
            seen_digit = true;
        } else {
            return false;
        }
    }
    // A numeral needs at least one digit: "." and "-." do not qualify.
    seen_digit
}

/// Wrap \p text in double quotes, escaping the characters that the DOT
/// grammar requires.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// A named attribute. The name is fixed at creation; only the value is ever
/// overwritten.
#[derive(Debug, Clone)]
pub struct Attr {
    name: String,
    value: AttrValue,
}

impl Attr {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: AttrValue::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Overwrite the value of the attribute.
    pub fn set<V: Into<AttrValue>>(&mut self, value: V) {
        self.value = value.into();
    }

    pub fn to_gv(&self) -> String {
        self.value.to_gv()
    }
}

/// An attribute store owned by one graph element. Attributes keep their
/// insertion order, which makes the emitted DOT text reproducible.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    list: Vec<Attr>,
}

impl Attrs {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// \return the attribute named \p name, creating it with the default
    /// value if it is not present yet.
    pub fn get(&mut self, name: &str) -> &mut Attr {
        let existing = self.list.iter().position(|attr| attr.name == name);
        match existing {
            Some(idx) => &mut self.list[idx],
            None => {
                self.list.push(Attr::new(name));
                self.list.last_mut().unwrap()
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&Attr> {
        self.list.iter().find(|attr| attr.name == name)
    }

    /// \return the attributes in insertion order.
    pub fn list(&self) -> &[Attr] {
        &self.list
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Render the store as a DOT attribute list body: `name = value` pairs
    /// joined by commas. Callers wrap the result in brackets, and skip empty
    /// stores entirely so that `[]` is never emitted.
    pub fn to_gv(&self) -> String {
        let mut out = String::new();
        let mut separator = "";
        for attr in &self.list {
            out.push_str(separator);
            out.push_str(&attr.name);
            out.push_str(" = ");
            out.push_str(&attr.to_gv());
            separator = ", ";
        }
        out
    }
}

#[test]
fn test_lazy_insertion() {
    let mut attrs = Attrs::new();
    assert!(attrs.is_empty());

    attrs.get("color").set("red");
    attrs.get("shape");
    assert_eq!(attrs.list().len(), 2);

    // The same name returns the same attribute.
    attrs.get("color").set("blue");
    assert_eq!(attrs.list().len(), 2);
    assert_eq!(attrs.find("color").unwrap().to_gv(), "blue");
}

#[test]
fn test_insertion_order() {
    let mut attrs = Attrs::new();
    attrs.get("z").set("1");
    attrs.get("a").set("2");
    attrs.get("m").set("3");
    assert_eq!(attrs.to_gv(), "z = 1, a = 2, m = 3");
}

#[test]
fn test_literal_forms() {
    assert_eq!(AttrValue::from("none").to_gv(), "none");
    assert_eq!(AttrValue::from("box3d").to_gv(), "box3d");
    assert_eq!(AttrValue::from("_tmp").to_gv(), "_tmp");
    assert_eq!(AttrValue::from(42).to_gv(), "42");
    assert_eq!(AttrValue::from(-1.5).to_gv(), "-1.5");
    assert_eq!(AttrValue::from("12").to_gv(), "12");
    assert_eq!(AttrValue::from(".5").to_gv(), ".5");
    assert_eq!(AttrValue::from("-.5").to_gv(), "-.5");
    assert_eq!(AttrValue::from(".").to_gv(), "\".\"");
    assert_eq!(AttrValue::from("-.").to_gv(), "\"-.\"");
    assert_eq!(AttrValue::from("-").to_gv(), "\"-\"");
    assert_eq!(AttrValue::from("hello world").to_gv(), "\"hello world\"");
    assert_eq!(AttrValue::from("3d").to_gv(), "\"3d\"");
    assert_eq!(AttrValue::from("").to_gv(), "\"\"");
    assert_eq!(AttrValue::from("say \"hi\"").to_gv(), "\"say \\\"hi\\\"\"");
}
