mod control;
mod fat_tree;
mod paths;
mod port_pool;
mod spanning;
