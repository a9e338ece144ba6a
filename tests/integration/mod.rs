mod crowdsale_workflows;
mod multi_round;
