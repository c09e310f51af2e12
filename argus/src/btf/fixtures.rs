//! A trimmed-down kernel type graph for tests.
//!
//! Offsets match an x86_64 6.x kernel closely enough to exercise the same shapes
//! (anonymous unions in `inode` and `qstr`, the anonymous struct wrapping most of
//! `mm_struct`, typedef'd single-member structs such as `kuid_t`).

use super::graph::TypeGraph;
use super::types::{Composite, Member, Param, Type, TypeId};

fn ptr(g: &mut TypeGraph, target: TypeId) -> TypeId {
	g.add(Type::Pointer { target })
}

fn konst(g: &mut TypeGraph, target: TypeId) -> TypeId {
	g.add(Type::Const { target })
}

fn define_struct(g: &mut TypeGraph, id: TypeId, name: &str, size: u32, members: Vec<Member>) {
	g.define(id, Type::Struct(Composite::new(name, size, members)))
		.unwrap_or_else(|err| panic!("cannot define {name}: {err}"));
}

fn anon_struct(g: &mut TypeGraph, size: u32, members: Vec<Member>) -> TypeId {
	g.add(Type::Struct(Composite::anonymous(size, members)))
}

fn anon_union(g: &mut TypeGraph, size: u32, members: Vec<Member>) -> TypeId {
	g.add(Type::Union(Composite::anonymous(size, members)))
}

fn func(g: &mut TypeGraph, name: &str, ret: TypeId, params: Vec<Param>) -> TypeId {
	let proto = g.add(Type::FuncProto { ret, params });
	g.add(Type::Func {
		name: name.to_string(),
		proto,
	})
}

pub(crate) fn kernel_types() -> TypeGraph {
	let mut g = TypeGraph::new();

	// -- Scalars
	let int = g.add(Type::int("int", 4, true));
	let uint = g.add(Type::int("unsigned int", 4, false));
	let long = g.add(Type::int("long", 8, true));
	let ulong = g.add(Type::int("unsigned long", 8, false));
	let ulonglong = g.add(Type::int("unsigned long long", 8, false));
	let longlong = g.add(Type::int("long long", 8, true));
	let uchar = g.add(Type::int("unsigned char", 1, false));
	let schar = g.add(Type::int("char", 1, true));
	let ushort = g.add(Type::int("unsigned short", 2, false));

	let u32_t = g.add(Type::typedef("u32", uint));
	let u64_t = g.add(Type::typedef("u64", ulonglong));
	let umode_t = g.add(Type::typedef("umode_t", ushort));
	let fmode_t = g.add(Type::typedef("fmode_t", uint));
	let loff_t = g.add(Type::typedef("loff_t", longlong));
	let pid_t = g.add(Type::typedef("pid_t", int));
	let kernel_uid = g.add(Type::typedef("__kernel_uid32_t", uint));
	let uid_t = g.add(Type::typedef("uid_t", kernel_uid));
	let kernel_gid = g.add(Type::typedef("__kernel_gid32_t", uint));
	let gid_t = g.add(Type::typedef("gid_t", kernel_gid));
	let pgdval_t = g.add(Type::typedef("pgdval_t", ulong));

	// -- Single-member wrappers
	let kuid_body = anon_struct(&mut g, 4, vec![Member::new("val", uid_t, 0)]);
	let kuid_t = g.add(Type::typedef("kuid_t", kuid_body));
	let kgid_body = anon_struct(&mut g, 4, vec![Member::new("val", gid_t, 0)]);
	let kgid_t = g.add(Type::typedef("kgid_t", kgid_body));
	let atomic_body = anon_struct(&mut g, 4, vec![Member::new("counter", int, 0)]);
	let atomic_t = g.add(Type::typedef("atomic_t", atomic_body));
	let pgd_body = anon_struct(&mut g, 8, vec![Member::new("pgd", pgdval_t, 0)]);
	let pgd_t = g.add(Type::typedef("pgd_t", pgd_body));

	// -- Declarations
	let task_struct = g.declare("task_struct");
	let linux_binprm = g.declare("linux_binprm");
	let file = g.declare("file");
	let path = g.declare("path");
	let dentry = g.declare("dentry");
	let qstr = g.declare("qstr");
	let inode = g.declare("inode");
	let mm_struct = g.declare("mm_struct");
	let cred = g.declare("cred");
	let task_group = g.declare("task_group");
	let css = g.declare("cgroup_subsys_state");
	let cgroup = g.declare("cgroup");
	let vfsmount = g.declare("vfsmount");
	let super_block = g.declare("super_block");
	let file_operations = g.declare("file_operations");
	let pipe_inode_info = g.declare("pipe_inode_info");
	let cdev = g.declare("cdev");
	let vm_area_struct = g.declare("vm_area_struct");

	// -- Pointers
	let task_ptr = ptr(&mut g, task_struct);
	let bprm_ptr = ptr(&mut g, linux_binprm);
	let file_ptr = ptr(&mut g, file);
	let dentry_ptr = ptr(&mut g, dentry);
	let inode_ptr = ptr(&mut g, inode);
	let mm_ptr = ptr(&mut g, mm_struct);
	let cred_ptr = ptr(&mut g, cred);
	let cred_ptr_ptr = ptr(&mut g, cred_ptr);
	let const_cred = konst(&mut g, cred);
	let const_cred_ptr = ptr(&mut g, const_cred);
	let task_group_ptr = ptr(&mut g, task_group);
	let cgroup_ptr = ptr(&mut g, cgroup);
	let vfsmount_ptr = ptr(&mut g, vfsmount);
	let sb_ptr = ptr(&mut g, super_block);
	let const_fops = konst(&mut g, file_operations);
	let const_fops_ptr = ptr(&mut g, const_fops);
	let pipe_ptr = ptr(&mut g, pipe_inode_info);
	let cdev_ptr = ptr(&mut g, cdev);
	let vma_ptr = ptr(&mut g, vm_area_struct);
	let char_ptr = ptr(&mut g, schar);
	let const_char = konst(&mut g, schar);
	let const_char_ptr = ptr(&mut g, const_char);
	let const_uchar = konst(&mut g, uchar);
	let const_uchar_ptr = ptr(&mut g, const_uchar);
	let pgd_ptr = ptr(&mut g, pgd_t);

	// -- Arrays
	let comm = g.add(Type::Array { elem: schar, len: 16 });
	let d_iname = g.add(Type::Array { elem: uchar, len: 32 });
	let cpu_bitmap = g.add(Type::Array { elem: ulong, len: 0 });

	// -- Structs
	let hash_len = anon_struct(&mut g, 8, vec![Member::new("hash", u32_t, 0), Member::new("len", u32_t, 4)]);
	let qstr_union = anon_union(&mut g, 8, vec![Member::anonymous(hash_len, 0), Member::new("hash_len", u64_t, 0)]);
	define_struct(
		&mut g,
		qstr,
		"qstr",
		16,
		vec![Member::anonymous(qstr_union, 0), Member::new("name", const_uchar_ptr, 8)],
	);

	define_struct(
		&mut g,
		dentry,
		"dentry",
		192,
		vec![
			Member::new("d_flags", uint, 0),
			Member::new("d_parent", dentry_ptr, 24),
			Member::new("d_name", qstr, 32),
			Member::new("d_inode", inode_ptr, 48),
			Member::new("d_iname", d_iname, 56),
			Member::new("d_sb", sb_ptr, 104),
		],
	);

	define_struct(
		&mut g,
		path,
		"path",
		16,
		vec![Member::new("mnt", vfsmount_ptr, 0), Member::new("dentry", dentry_ptr, 8)],
	);

	let inode_union = anon_union(
		&mut g,
		8,
		vec![
			Member::new("i_pipe", pipe_ptr, 0),
			Member::new("i_cdev", cdev_ptr, 0),
			Member::new("i_link", char_ptr, 0),
			Member::new("i_dir_seq", uint, 0),
		],
	);
	define_struct(
		&mut g,
		inode,
		"inode",
		600,
		vec![
			Member::new("i_mode", umode_t, 0),
			Member::new("i_flags", uint, 12),
			Member::new("i_sb", sb_ptr, 40),
			Member::new("i_ino", ulong, 64),
			Member::new("i_size", loff_t, 80),
			Member::anonymous(inode_union, 560),
		],
	);

	let file_union = anon_union(&mut g, 16, vec![Member::new("f_iocb_flags", uint, 0)]);
	define_struct(
		&mut g,
		file,
		"file",
		232,
		vec![
			Member::anonymous(file_union, 0),
			Member::new("f_path", path, 16),
			Member::new("f_inode", inode_ptr, 32),
			Member::new("f_op", const_fops_ptr, 40),
			Member::new("f_flags", uint, 56),
			Member::new("f_mode", fmode_t, 60),
		],
	);

	let mm_body = anon_struct(
		&mut g,
		960,
		vec![
			Member::new("mmap_base", ulong, 16),
			Member::new("task_size", ulong, 32),
			Member::new("pgd", pgd_ptr, 72),
			Member::new("mm_users", atomic_t, 80),
			Member::new("start_code", ulong, 288),
			Member::new("arg_start", ulong, 328),
			Member::new("arg_end", ulong, 336),
			Member::new("env_start", ulong, 344),
		],
	);
	define_struct(
		&mut g,
		mm_struct,
		"mm_struct",
		1000,
		vec![Member::anonymous(mm_body, 0), Member::new("cpu_bitmap", cpu_bitmap, 960)],
	);

	define_struct(
		&mut g,
		linux_binprm,
		"linux_binprm",
		400,
		vec![
			Member::new("vma", vma_ptr, 0),
			Member::new("vma_pages", ulong, 8),
			Member::new("mm", mm_ptr, 16),
			Member::new("p", ulong, 24),
			Member::new("executable", file_ptr, 48),
			Member::new("interpreter", file_ptr, 56),
			Member::new("file", file_ptr, 64),
			Member::new("cred", cred_ptr, 72),
			Member::new("unsafe", int, 80),
			Member::new("per_clear", uint, 84),
			Member::new("argc", int, 88),
			Member::new("envc", int, 92),
			Member::new("filename", const_char_ptr, 96),
			Member::new("interp", const_char_ptr, 104),
		],
	);

	define_struct(
		&mut g,
		cred,
		"cred",
		176,
		vec![
			Member::new("usage", atomic_t, 0),
			Member::new("uid", kuid_t, 4),
			Member::new("gid", kgid_t, 8),
			Member::new("suid", kuid_t, 12),
			Member::new("sgid", kgid_t, 16),
			Member::new("euid", kuid_t, 20),
			Member::new("egid", kgid_t, 24),
		],
	);

	define_struct(
		&mut g,
		css,
		"cgroup_subsys_state",
		200,
		vec![
			Member::new("cgroup", cgroup_ptr, 0),
			Member::new("id", int, 120),
			Member::new("flags", uint, 124),
		],
	);

	define_struct(&mut g, task_group, "task_group", 300, vec![Member::new("css", css, 0)]);

	define_struct(
		&mut g,
		task_struct,
		"task_struct",
		3000,
		vec![
			Member::new("__state", uint, 24),
			Member::new("prio", int, 112),
			Member::new("sched_task_group", task_group_ptr, 600),
			Member::new("mm", mm_ptr, 880),
			Member::new("pid", pid_t, 1400),
			Member::new("tgid", pid_t, 1404),
			Member::new("real_parent", task_ptr, 1416),
			Member::new("parent", task_ptr, 1424),
			Member::new("real_cred", const_cred_ptr, 1832),
			Member::new("cred", const_cred_ptr, 1840),
			Member::new("comm", comm, 1856),
		],
	);

	// -- Hooks
	let void = TypeId::VOID;
	func(&mut g, "wake_up_new_task", void, vec![Param::new("p", task_ptr)]);
	func(&mut g, "security_bprm_check", int, vec![Param::new("bprm", bprm_ptr)]);
	func(
		&mut g,
		"security_inode_copy_up",
		int,
		vec![Param::new("src", dentry_ptr), Param::new("new", cred_ptr_ptr)],
	);
	func(
		&mut g,
		"do_sys_open",
		long,
		vec![
			Param::new("dfd", int),
			Param::new("filename", const_char_ptr),
			Param::new("flags", int),
			Param::new("mode", umode_t),
		],
	);
	func(&mut g, "commit_creds", int, vec![Param::new("new", cred_ptr)]);

	g
}
