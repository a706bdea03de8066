//! Unit tests mirroring the `src/` tree, plus checks on the binary's argument surface


#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use seammerge::io::cli::Cli;

    // Tests that the argument definitions have no conflicting flags
    // Verified by giving two arguments the same short flag
    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    // Tests that help mentions every map option
    #[test]
    fn test_cli_help_lists_map_options() {
        let help = Cli::command().render_long_help().to_string();

        assert!(help.contains("--structure"));
        assert!(help.contains("--importance"));
        assert!(help.contains("--columns"));
        assert!(help.contains("--rows"));
    }
}
