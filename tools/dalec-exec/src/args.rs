//! Helper traits for building up `docker build` argument vectors.

/// Append a `--build-arg NAME=value` pair.
pub trait BuildArg {
    fn build_arg(&mut self, key: impl AsRef<str>, value: impl AsRef<str>);
}

impl BuildArg for Vec<String> {
    fn build_arg(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) {
        self.push("--build-arg".to_string());
        self.push(format!("{}={}", key.as_ref(), value.as_ref()));
    }
}

/// Append a `--secret type=...,id=...,src=...` triple.
pub trait BuildSecret {
    fn build_secret(&mut self, typ: impl AsRef<str>, id: impl AsRef<str>, src: impl AsRef<str>);
}

impl BuildSecret for Vec<String> {
    fn build_secret(&mut self, typ: impl AsRef<str>, id: impl AsRef<str>, src: impl AsRef<str>) {
        self.push("--secret".to_string());
        self.push(format!(
            "type={},id={},src={}",
            typ.as_ref(),
            id.as_ref(),
            src.as_ref()
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_arg_formats_as_key_value() {
        let mut args = Vec::new();
        args.build_arg("TARGET", "jammy");
        assert_eq!(args, vec!["--build-arg".to_string(), "TARGET=jammy".to_string()]);
    }

    #[test]
    fn build_secret_formats_as_triple() {
        let mut args = Vec::new();
        args.build_secret("env", "gpg-key.env", "GPG_KEY");
        assert_eq!(
            args,
            vec![
                "--secret".to_string(),
                "type=env,id=gpg-key.env,src=GPG_KEY".to_string()
            ]
        );
    }
}
