//! Package name and version newtypes.
//!
//! Both halves of a specifier are kept verbatim: the remote side decides
//! whether names are case sensitive, and versions are never interpreted.

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Return the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_newtype! {
    /// A package name as given on the command line (e.g. `my-library`).
    PackageName
}

string_newtype! {
    /// An opaque version string (e.g. `3.5.1`).
    ///
    /// It only has to exist on the remote. Dot-separated numbers are
    /// recommended but not required.
    Version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_verbatim() {
        let name = PackageName::from("My-Library");
        assert_eq!(name, "My-Library");
        assert_eq!(name.to_string(), "My-Library");
        assert_eq!(Version::from(String::from("1.0-RC1")).as_str(), "1.0-RC1");
    }
}
