/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Load the first document of a yaml string, `YamlLoader` should be in scope.
#[macro_export]
macro_rules! yaml_doc {
    ($s:expr) => {
        YamlLoader::load_from_str($s).unwrap().remove(0)
    };
}

/// Build a plain yaml string value, `Yaml` should be in scope.
#[macro_export]
macro_rules! yaml_str {
    ($s:expr) => {
        Yaml::String($s.to_string())
    };
}
