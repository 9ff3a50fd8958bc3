//! Type names for registries and log output

/// Types may declare an explicit name; otherwise the Rust type name is used
pub trait TypeName {
    const TYPE_NAME: Option<&'static str> = None;
}

/// The declared name of `T`, or the last path segment of its Rust type name
pub fn get_type_name<T: TypeName>() -> String {
    match T::TYPE_NAME {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => short_type_name::<T>(),
    }
}

/// [`get_type_name`] for the type of an instance
pub fn get_type_name_of<T: TypeName>(_instance: &T) -> String {
    get_type_name::<T>()
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let (path, generics) = match full.find('<') {
        Some(pos) => full.split_at(pos),
        None => (full, ""),
    };
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{}{}", base, generics)
}
