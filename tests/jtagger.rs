#[cfg(test)]
mod tests {
    use jtagctl::console::ScriptedConsole;
    use jtagctl::link::LinkParams;

    #[test]
    #[ignore = "requires a Jtagger probe attached on /dev/ttyUSB0"]
    fn test_jtagger_session() {
        use jtagctl::Controller;

        let port = "/dev/ttyUSB0".to_string();

        // Simple: preset probe, immediate terminate
        {
            let controller = Controller::new(jtagctl::Probe::ArduinoUno).unwrap();
            controller
                .run_with(ScriptedConsole::new(["s", "z"]))
                .unwrap();
        }

        // From explicit link parameters
        {
            let mut controller =
                Controller::from_link_params(LinkParams::new(port).with_baud(115_200)).unwrap();

            controller.startup_spinner(true);
            controller
                .run_with(ScriptedConsole::new(["s", "read_idcode", "z"]))
                .unwrap();
        }
    }
}
