// Mon Oct 19 2026 - Alex

/// Size of a fundamental type on an LP64-style target, or `None` when the
/// name is not a fundamental type. `long` and friends follow the pointer width.
pub fn fundamental_size(name: &str, pointer_width: u64) -> Option<u64> {
    let size = match name {
        "bool" | "char" | "signed char" | "unsigned char" | "char8_t" | "int8_t"
        | "uint8_t" | "std::byte" => 1,
        "short" | "short int" | "unsigned short" | "unsigned short int" | "char16_t"
        | "int16_t" | "uint16_t" => 2,
        "int" | "unsigned" | "unsigned int" | "char32_t" | "wchar_t" | "float" | "int32_t"
        | "uint32_t" => 4,
        "long long" | "long long int" | "unsigned long long" | "unsigned long long int"
        | "double" | "int64_t" | "uint64_t" => 8,
        "long" | "long int" | "unsigned long" | "unsigned long int" | "size_t" | "ssize_t"
        | "ptrdiff_t" | "intptr_t" | "uintptr_t" | "std::nullptr_t" => pointer_width,
        "long double" | "__int128" | "unsigned __int128" => 16,
        _ => return None,
    };
    Some(size)
}

/// Strips cv-qualifiers and elaborated type specifiers.
pub fn normalize(name: &str) -> &str {
    let mut name = name.trim();
    loop {
        let stripped = ["const ", "volatile ", "struct ", "class ", "union ", "enum "]
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
            .or_else(|| name.strip_suffix(" const"))
            .or_else(|| name.strip_suffix(" volatile"));
        match stripped {
            Some(rest) => name = rest.trim(),
            None => return name,
        }
    }
}

/// Splits `T[N]` into the element spelling and the outermost count.
pub fn split_array(name: &str) -> Option<(&str, u64)> {
    let inner = name.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let count = inner[open + 1..].trim().parse().ok()?;
    Some((inner[..open].trim_end(), count))
}

pub fn is_pointer(name: &str) -> bool {
    name.ends_with('*') || name.ends_with('&')
}
