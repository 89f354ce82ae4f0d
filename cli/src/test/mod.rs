mod command_flows;
