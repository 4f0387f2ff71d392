pub mod u901_demo_data;
